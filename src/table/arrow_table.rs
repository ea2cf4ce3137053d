//! Table backed by Arrow record batches.

use arrow::array::RecordBatch;

use super::batches::BatchSet;
use super::styler::Styler;
use super::{check_bounds, SourceCell, Table};
use crate::cell::CellRole;
use crate::error::{Error, Result};

/// A data frame split into Arrow parts.
///
/// Layout:
/// - header rows come from the column header batch (one row per level, one
///   column per data column) or, without one, from the data schema's field
///   names as a single header row
/// - index columns come from the index batch (one column per level, one row
///   per data row); without one the table has no index column
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arrow::array::{Int64Array, RecordBatch};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use productive_table::table::{ArrowTable, Table};
///
/// let schema = Arc::new(Schema::new(vec![Field::new("foo", DataType::Int64, false)]));
/// let batch = RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![1, 2, 3]))])?;
/// let table = ArrowTable::from_batch(batch);
///
/// assert_eq!(table.header_rows(), 1);
/// assert_eq!(table.rows(), 4);
/// assert_eq!(table.cell(0, 0)?.content.as_deref(), Some("foo"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArrowTable {
    data: BatchSet,
    index: Option<BatchSet>,
    column_headers: Option<BatchSet>,
    styler: Option<Styler>,
}

impl ArrowTable {
    /// Table over data batches, headers taken from field names.
    pub fn new(data: BatchSet) -> Self {
        Self {
            data,
            index: None,
            column_headers: None,
            styler: None,
        }
    }

    /// Table over a single data batch.
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self::new(BatchSet::from_batch(batch))
    }

    /// Attach index levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] unless the index has one row per
    /// data row.
    pub fn with_index(mut self, index: BatchSet) -> Result<Self> {
        if index.row_count() != self.data.row_count() {
            return Err(Error::schema_mismatch(format!(
                "index has {} rows, data has {}",
                index.row_count(),
                self.data.row_count()
            )));
        }
        self.index = Some(index);
        Ok(self)
    }

    /// Attach column header levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] unless the header batch has one
    /// column per data column.
    pub fn with_column_headers(mut self, headers: BatchSet) -> Result<Self> {
        if headers.column_count() != self.data.column_count() {
            return Err(Error::schema_mismatch(format!(
                "column headers have {} columns, data has {}",
                headers.column_count(),
                self.data.column_count()
            )));
        }
        self.column_headers = Some(headers);
        Ok(self)
    }

    /// Attach styling metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] when display values do not have the
    /// data's shape.
    pub fn with_styler(mut self, styler: Styler) -> Result<Self> {
        if let Some(display) = &styler.display_values {
            if display.row_count() != self.data.row_count()
                || display.column_count() != self.data.column_count()
            {
                return Err(Error::schema_mismatch(format!(
                    "display values are {}x{}, data is {}x{}",
                    display.row_count(),
                    display.column_count(),
                    self.data.row_count(),
                    self.data.column_count()
                )));
            }
        }
        self.styler = Some(styler);
        Ok(self)
    }


    fn index_cell(&self, level: usize, data_row: usize) -> Result<SourceCell> {
        let content = match &self.index {
            Some(index) => index.value(data_row, level)?,
            None => None,
        };
        let mut cell = SourceCell::new(CellRole::Index.tag(), content)
            .with_class_names(format!("row_heading level{level} row{data_row}"));
        if let Some(styler) = &self.styler {
            cell = cell.with_id(styler.index_cell_id(level, data_row));
        }
        Ok(cell)
    }

    fn header_cell(&self, level: usize, data_col: usize) -> Result<SourceCell> {
        let content = match &self.column_headers {
            Some(headers) => headers.value(level, data_col)?,
            None => self.data.field_name(data_col).map(str::to_string),
        };
        let mut cell = SourceCell::new(CellRole::ColumnHeader.tag(), content)
            .with_class_names(format!("col_heading level{level} col{data_col}"));
        if let Some(styler) = &self.styler {
            cell = cell.with_id(styler.header_cell_id(level, data_col));
        }
        Ok(cell)
    }

    fn data_cell(&self, data_row: usize, data_col: usize) -> Result<SourceCell> {
        let display = match self.styler.as_ref().and_then(|s| s.display_values.as_ref()) {
            Some(values) => values.value(data_row, data_col)?,
            None => None,
        };
        let content = match display {
            Some(text) => Some(text),
            None => self.data.value(data_row, data_col)?,
        };
        let mut cell = SourceCell::new(CellRole::Data.tag(), content)
            .with_class_names(format!("data row{data_row} col{data_col}"));
        if let Some(styler) = &self.styler {
            cell = cell.with_id(styler.data_cell_id(data_row, data_col));
        }
        Ok(cell)
    }
}

impl Table for ArrowTable {
    fn header_rows(&self) -> usize {
        self.column_headers
            .as_ref()
            .map_or(1, BatchSet::row_count)
    }

    fn header_columns(&self) -> usize {
        self.index.as_ref().map_or(0, BatchSet::column_count)
    }

    fn rows(&self) -> usize {
        self.header_rows() + self.data.row_count()
    }

    fn columns(&self) -> usize {
        self.header_columns() + self.data.column_count()
    }

    fn cell(&self, row: usize, col: usize) -> Result<SourceCell> {
        check_bounds(self, row, col)?;

        let header_rows = self.header_rows();
        let header_columns = self.header_columns();

        match CellRole::at(header_rows, header_columns, row, col) {
            CellRole::Blank => Ok(SourceCell::new(CellRole::Blank.tag(), Some(String::new()))
                .with_class_names("blank")),
            CellRole::Index => self.index_cell(col, row - header_rows),
            CellRole::ColumnHeader => self.header_cell(row, col - header_columns),
            CellRole::Data => self.data_cell(row - header_rows, col - header_columns),
        }
    }

    fn uuid(&self) -> Option<&str> {
        self.styler
            .as_ref()
            .map(|s| s.uuid.as_str())
            .filter(|u| !u.is_empty())
    }

    fn caption(&self) -> Option<&str> {
        self.styler.as_ref().and_then(|s| s.caption.as_deref())
    }

    fn styles(&self) -> Option<&str> {
        self.styler.as_ref().and_then(|s| s.styles.as_deref())
    }
}
