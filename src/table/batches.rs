//! Row-addressable view over a sequence of record batches.

use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;

use super::format::format_array_value;
use crate::error::{Error, Result};

/// Record batches sharing one schema, addressed by global row index.
///
/// An IPC stream usually arrives as several batches; cumulative row offsets
/// make each global row resolvable with a binary search.
#[derive(Debug, Clone)]
pub struct BatchSet {
    /// Record batches containing the data
    batches: Vec<RecordBatch>,
    /// Cached schema reference
    schema: SchemaRef,
    /// Cached total row count
    total_rows: usize,
    /// Cumulative row offsets for batch lookup
    batch_offsets: Vec<usize>,
}

impl BatchSet {
    /// Create a batch set, checking every batch against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] when a batch has a different column
    /// count than the schema.
    pub fn new(batches: Vec<RecordBatch>, schema: SchemaRef) -> Result<Self> {
        let column_count = schema.fields().len();
        if let Some(bad) = batches.iter().find(|b| b.num_columns() != column_count) {
            return Err(Error::schema_mismatch(format!(
                "batch has {} columns, schema has {column_count}",
                bad.num_columns()
            )));
        }

        let total_rows = batches.iter().map(|b| b.num_rows()).sum();

        let mut batch_offsets = Vec::with_capacity(batches.len() + 1);
        batch_offsets.push(0);
        let mut offset = 0;
        for batch in &batches {
            offset += batch.num_rows();
            batch_offsets.push(offset);
        }

        Ok(Self {
            batches,
            schema,
            total_rows,
            batch_offsets,
        })
    }

    /// Batch set holding a single batch.
    pub fn from_batch(batch: RecordBatch) -> Self {
        let schema = batch.schema();
        let total_rows = batch.num_rows();
        Self {
            batches: vec![batch],
            schema,
            total_rows,
            batch_offsets: vec![0, total_rows],
        }
    }

    /// Total rows across all batches.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.total_rows
    }

    /// Number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.schema.fields().len()
    }

    /// Field name of a column.
    pub fn field_name(&self, col: usize) -> Option<&str> {
        self.schema.fields().get(col).map(|f| f.name().as_str())
    }

    /// Formatted value; `None` for nulls and positions outside the set.
    ///
    /// # Errors
    ///
    /// Propagates formatting errors from Arrow.
    pub fn value(&self, row: usize, col: usize) -> Result<Option<String>> {
        if col >= self.column_count() {
            return Ok(None);
        }

        let Some((batch_idx, local_row)) = self.locate_row(row) else {
            return Ok(None);
        };

        let Some(batch) = self.batches.get(batch_idx) else {
            return Ok(None);
        };

        format_array_value(batch.column(col).as_ref(), local_row)
    }

    /// Locate a row within the batch structure
    pub fn locate_row(&self, global_row: usize) -> Option<(usize, usize)> {
        if global_row >= self.total_rows {
            return None;
        }

        // Empty batches repeat an offset; the last batch starting at the row
        // is the one that holds it.
        let batch_idx = self
            .batch_offsets
            .partition_point(|&start| start <= global_row)
            .saturating_sub(1);

        let batch_start = self.batch_offsets.get(batch_idx).copied().unwrap_or(0);
        Some((batch_idx, global_row - batch_start))
    }
}
