//! Cell roles and render-ready cell views.
//!
//! Every position of a table has exactly one [`CellRole`], derived from the
//! position alone. Sources also report a role tag per cell; that tag is parsed
//! into the closed role set and must agree with the position.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role of a table position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    /// Top-left corner: header row crossed with index column.
    Blank,
    /// Index column cell identifying a data row.
    Index,
    /// Header row cell naming a data column.
    #[serde(rename = "columns", alias = "column_header")]
    ColumnHeader,
    /// Regular data cell.
    Data,
}

impl CellRole {
    /// All roles, in layout order.
    pub const ALL: [Self; 4] = [Self::Blank, Self::Index, Self::ColumnHeader, Self::Data];

    /// Classify a position.
    ///
    /// Depends only on the layout counts, never on cell content.
    #[must_use]
    pub fn at(header_rows: usize, header_columns: usize, row: usize, col: usize) -> Self {
        match (row < header_rows, col < header_columns) {
            (true, true) => Self::Blank,
            (true, false) => Self::ColumnHeader,
            (false, true) => Self::Index,
            (false, false) => Self::Data,
        }
    }

    /// Parse a source role tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] for any tag outside the role set.
    pub fn from_tag(tag: &str, row: usize, col: usize) -> Result<Self> {
        match tag {
            "blank" => Ok(Self::Blank),
            "index" => Ok(Self::Index),
            "columns" | "column_header" => Ok(Self::ColumnHeader),
            "data" => Ok(Self::Data),
            other => Err(Error::decode(row, col, other)),
        }
    }

    /// Canonical wire tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Index => "index",
            Self::ColumnHeader => "columns",
            Self::Data => "data",
        }
    }

    /// Whether the role renders as a header cell.
    #[inline]
    #[must_use]
    pub fn is_header(self) -> bool {
        !matches!(self, Self::Data)
    }

    /// Whether the role belongs to the index column(s).
    #[inline]
    #[must_use]
    pub fn is_index_column(self) -> bool {
        matches!(self, Self::Blank | Self::Index)
    }

    /// HTML element used for this role.
    #[must_use]
    pub fn html_tag(self) -> &'static str {
        if self.is_header() {
            "th"
        } else {
            "td"
        }
    }
}

impl std::fmt::Display for CellRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A decoded, render-ready cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Role derived from the cell position.
    pub role: CellRole,
    /// Display text, already resolved against the missing-value policy.
    pub text: String,
    /// Presentation classes, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub class_names: Option<String>,
    /// Style binding id, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
}

/// A decoded row, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    /// Row index in the source table.
    pub source_row: usize,
    /// Cells in source column order.
    pub cells: Vec<CellView>,
}

impl RowView {
    /// Number of decoded cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no decoded cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Display texts of the row, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.text.as_str())
    }
}
