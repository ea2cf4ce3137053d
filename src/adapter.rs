//! Table decoding and cell classification.
//!
//! [`TableAdapter`] turns any [`Table`] into ordered [`RowView`]s with no
//! residual knowledge of the source format. Decoding is synchronous,
//! deterministic and never mutates the table.

use indexmap::IndexSet;

use crate::cell::{CellRole, CellView, RowView};
use crate::config::{DisplayOptions, IndexVisibility, RenderPolicy};
use crate::error::{Error, Result};
use crate::grid_model::GridModel;
use crate::table::Table;

/// Both sections of a decoded table plus the metadata renderers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTable {
    /// Header section rows.
    pub header: Vec<RowView>,
    /// Data section rows.
    pub body: Vec<RowView>,
    /// Columns spanned by the empty-table placeholder; at least 1.
    pub column_span: usize,
    /// Style id namespace.
    pub uuid: Option<String>,
    /// Caption.
    pub caption: Option<String>,
    /// CSS rules.
    pub styles: Option<String>,
}

impl DecodedTable {
    /// Whether the data section has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Decodes tables under a fixed [`RenderPolicy`].
///
/// # Example
///
/// ```
/// use productive_table::{DisplayOptions, TableAdapter};
/// use productive_table::table::{GridCell, GridTable};
///
/// let cell = |kind: &str, content: &str| GridCell {
///     kind: kind.to_string(),
///     content: Some(content.into()),
///     class_names: None,
///     id: None,
/// };
/// let table = GridTable::new(1, 0, vec![
///     vec![cell("columns", "foo")],
///     vec![cell("data", "1")],
/// ])?;
///
/// let adapter = TableAdapter::default();
/// let model = adapter.build_grid_model(&table, &DisplayOptions::new())?;
/// assert_eq!(model.rows[0].get("foo"), Some("1"));
/// # Ok::<(), productive_table::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableAdapter {
    policy: RenderPolicy,
}

impl TableAdapter {
    /// Create an adapter for a deployment policy.
    pub fn new(policy: RenderPolicy) -> Self {
        Self { policy }
    }

    /// The policy this adapter decodes with.
    #[inline]
    pub fn policy(&self) -> &RenderPolicy {
        &self.policy
    }

    /// Decode one section of the table.
    ///
    /// The header section covers `[0, header_rows)`, the data section
    /// `[header_rows, rows)`. Without the index column decoding starts after
    /// the index columns, and never before column 1.
    ///
    /// # Errors
    ///
    /// Propagates the first cell that fails [`TableAdapter::decode_cell`].
    pub fn decode_rows(
        &self,
        table: &dyn Table,
        is_header_section: bool,
        include_index_column: bool,
    ) -> Result<Vec<RowView>> {
        let header_rows = table.header_rows().min(table.rows());
        let row_range = if is_header_section {
            0..header_rows
        } else {
            header_rows..table.rows()
        };
        let first_col = first_column(table, include_index_column);

        row_range
            .map(|row| {
                let cells = (first_col..table.columns())
                    .map(|col| self.decode_cell(table, row, col))
                    .filter(|cell| match (cell, self.policy.index_visibility) {
                        (Ok(cell), IndexVisibility::Omit) => !cell.role.is_index_column(),
                        _ => true,
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(RowView {
                    source_row: row,
                    cells,
                })
            })
            .collect()
    }

    /// Decode and classify a single cell.
    ///
    /// The role comes from the position. The source's tag must name a known
    /// role and agree with it. Blank cells render empty; other absent
    /// content goes through the missing-value policy.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] for an unknown tag
    /// - [`Error::RoleMismatch`] for a tag contradicting the position
    /// - source errors such as [`Error::CellOutOfBounds`]
    pub fn decode_cell(&self, table: &dyn Table, row: usize, col: usize) -> Result<CellView> {
        let role = CellRole::at(table.header_rows(), table.header_columns(), row, col);
        let source = table.cell(row, col)?;

        let tagged = CellRole::from_tag(&source.kind, row, col)?;
        if tagged != role {
            return Err(Error::RoleMismatch {
                row,
                col,
                expected: role.tag(),
                found: tagged.tag(),
            });
        }

        let text = match role {
            CellRole::Blank => source.content.unwrap_or_default(),
            CellRole::Index | CellRole::ColumnHeader | CellRole::Data => {
                self.policy.missing_value.resolve(source.content)
            }
        };

        Ok(CellView {
            role,
            text,
            class_names: source.class_names,
            id: source.id,
        })
    }

    /// Build the named-column model for grid widgets.
    ///
    /// Column names are the texts of the first header row; lower header
    /// levels are dropped. Each data row is keyed by the names, so a repeated
    /// name keeps only its last value. Length differences follow the shape
    /// policy.
    ///
    /// # Errors
    ///
    /// Decoding errors, and [`Error::ShapeMismatch`] under
    /// [`crate::ShapePolicy::Reject`].
    pub fn build_grid_model(
        &self,
        table: &dyn Table,
        options: &DisplayOptions,
    ) -> Result<GridModel> {
        let include_index = options.include_index_column();
        let header = self.decode_rows(table, true, include_index)?;
        let body = self.decode_rows(table, false, include_index)?;

        let names: Vec<String> = header
            .first()
            .map(|row| row.texts().map(str::to_string).collect())
            .unwrap_or_default();
        let duplicates = duplicate_names(&names);
        if !duplicates.is_empty() {
            log::warn!(
                "grid model: repeated column names {duplicates:?} keep only their last value"
            );
        }

        let rows = body
            .into_iter()
            .map(|row| (row.source_row, row.cells.into_iter().map(|c| c.text).collect()));

        let model = GridModel::zip(names, rows, self.policy.shape)?;
        log::debug!(
            "grid model: {} columns, {} rows",
            model.columns.len(),
            model.rows.len()
        );
        Ok(model)
    }

    /// Decode both sections and collect table metadata.
    ///
    /// # Errors
    ///
    /// Propagates decoding errors; nothing partial is returned.
    pub fn decode(&self, table: &dyn Table, options: &DisplayOptions) -> Result<DecodedTable> {
        let include_index = options.include_index_column();
        let header = self.decode_rows(table, true, include_index)?;
        let body = self.decode_rows(table, false, include_index)?;

        log::debug!(
            "decoded {} header rows and {} data rows (index {})",
            header.len(),
            body.len(),
            if include_index { "shown" } else { "hidden" }
        );

        Ok(DecodedTable {
            header,
            body,
            column_span: self.visible_columns(table, include_index).max(1),
            uuid: table.uuid().map(str::to_string),
            caption: table.caption().map(str::to_string),
            styles: table.styles().map(str::to_string),
        })
    }

    fn visible_columns(&self, table: &dyn Table, include_index_column: bool) -> usize {
        let first_col = first_column(table, include_index_column);
        let hidden_index = match self.policy.index_visibility {
            IndexVisibility::Omit => table.header_columns().saturating_sub(first_col),
            IndexVisibility::RenderEmpty => 0,
        };
        table
            .columns()
            .saturating_sub(first_col)
            .saturating_sub(hidden_index)
    }
}

fn first_column(table: &dyn Table, include_index_column: bool) -> usize {
    if include_index_column {
        0
    } else {
        table.header_columns().max(1)
    }
}

/// Names that occur more than once, in first-repeat order.
fn duplicate_names(names: &[String]) -> Vec<&str> {
    let mut seen = IndexSet::new();
    let mut repeated = IndexSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            repeated.insert(name.as_str());
        }
    }
    repeated.into_iter().collect()
}
