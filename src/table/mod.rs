//! Tabular sources.
//!
//! A [`Table`] exposes a rectangular grid of raw cells plus layout counts.
//! Two sources are provided:
//! - [`ArrowTable`] - Arrow record batches (data, index levels, column header
//!   levels) with optional [`Styler`] metadata
//! - [`GridTable`] - a pre-classified cell grid where each cell carries its
//!   own role tag
//!
//! Sources never classify trust: the tag they report is checked against the
//! position by [`crate::TableAdapter`].

mod arrow_table;
mod batches;
mod format;
mod grid;
mod ipc;
mod styler;

use serde::{Deserialize, Serialize};

pub use arrow_table::ArrowTable;
pub use batches::BatchSet;
pub use format::{format_array_value, truncate_string};
pub use grid::{GridCell, GridTable};
pub use ipc::{read_ipc_stream, write_ipc_stream};
pub use styler::Styler;

use crate::error::{Error, Result};

/// A raw cell exactly as the source reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCell {
    /// Source role tag (`blank`, `index`, `columns`, `data`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Textual content; `None` when the value is missing.
    #[serde(default)]
    pub content: Option<String>,
    /// Presentation classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_names: Option<String>,
    /// Style binding id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SourceCell {
    /// Create a cell with a tag and optional content.
    pub fn new(kind: impl Into<String>, content: Option<String>) -> Self {
        Self {
            kind: kind.into(),
            content,
            class_names: None,
            id: None,
        }
    }

    /// Set presentation classes.
    #[must_use]
    pub fn with_class_names(mut self, class_names: impl Into<String>) -> Self {
        self.class_names = Some(class_names.into());
        self
    }

    /// Set the style binding id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Read-only tabular source with header rows and index columns.
pub trait Table {
    /// Number of leading header rows.
    fn header_rows(&self) -> usize;

    /// Number of leading index columns.
    fn header_columns(&self) -> usize;

    /// Total rows, header rows included.
    fn rows(&self) -> usize;

    /// Total columns, index columns included.
    fn columns(&self) -> usize;

    /// Raw cell at a position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] outside the table and any error the
    /// source hits while converting the value to text.
    fn cell(&self, row: usize, col: usize) -> Result<SourceCell>;

    /// Unique identifier used to namespace style ids.
    fn uuid(&self) -> Option<&str> {
        None
    }

    /// Table caption.
    fn caption(&self) -> Option<&str> {
        None
    }

    /// CSS rules keyed by generated cell ids.
    fn styles(&self) -> Option<&str> {
        None
    }

    /// Rows after the header section.
    fn data_rows(&self) -> usize {
        self.rows().saturating_sub(self.header_rows())
    }

    /// Columns after the index columns.
    fn data_columns(&self) -> usize {
        self.columns().saturating_sub(self.header_columns())
    }
}

/// Bounds check shared by table implementations.
pub(crate) fn check_bounds(table: &dyn Table, row: usize, col: usize) -> Result<()> {
    if row >= table.rows() || col >= table.columns() {
        return Err(Error::CellOutOfBounds {
            row,
            col,
            rows: table.rows(),
            columns: table.columns(),
        });
    }
    Ok(())
}
