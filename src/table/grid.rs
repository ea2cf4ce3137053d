//! Pre-classified cell grid.

use serde::{Deserialize, Serialize};

use super::{check_bounds, SourceCell, Table};
use crate::error::{Error, Result};

/// Wire form of a grid cell; content may be any JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Source role tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Cell value; `null` or missing means absent.
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    /// Presentation classes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_names: Option<String>,
    /// Style binding id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl GridCell {
    fn to_source(&self) -> SourceCell {
        let content = match &self.content {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        SourceCell {
            kind: self.kind.clone(),
            content,
            class_names: self.class_names.clone(),
            id: self.id.clone(),
        }
    }
}

/// A rectangular grid where every cell carries its own role tag.
///
/// Hosts that classify cells themselves send this form; tags are checked
/// against the layout counts during decoding, so a corrupted tag is caught
/// there rather than rendered. The shape is checked on construction and on
/// deserialization alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridTable")]
pub struct GridTable {
    /// Leading header rows.
    #[serde(default)]
    header_rows: usize,
    /// Leading index columns.
    #[serde(default)]
    header_columns: usize,
    /// Row-major cells.
    #[serde(default)]
    cells: Vec<Vec<GridCell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    styles: Option<String>,
}

/// Unchecked wire form of [`GridTable`].
#[derive(Deserialize)]
struct RawGridTable {
    #[serde(default)]
    header_rows: usize,
    #[serde(default)]
    header_columns: usize,
    #[serde(default)]
    cells: Vec<Vec<GridCell>>,
    #[serde(default)]
    uuid: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    styles: Option<String>,
}

impl TryFrom<RawGridTable> for GridTable {
    type Error = Error;

    fn try_from(raw: RawGridTable) -> Result<Self> {
        let table = Self {
            header_rows: raw.header_rows,
            header_columns: raw.header_columns,
            cells: raw.cells,
            uuid: raw.uuid,
            caption: raw.caption,
            styles: raw.styles,
        };
        table.validate()?;
        Ok(table)
    }
}

impl GridTable {
    /// Create a grid, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] for ragged rows or layout counts
    /// larger than the grid.
    pub fn new(header_rows: usize, header_columns: usize, cells: Vec<Vec<GridCell>>) -> Result<Self> {
        let table = Self {
            header_rows,
            header_columns,
            cells,
            uuid: None,
            caption: None,
            styles: None,
        };
        table.validate()?;
        Ok(table)
    }

    /// Set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    fn validate(&self) -> Result<()> {
        let width = self.columns();
        if let Some((row, cells)) = self
            .cells
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != width)
        {
            return Err(Error::schema_mismatch(format!(
                "grid row {row} has {} cells, expected {width}",
                cells.len()
            )));
        }
        if self.header_rows > self.cells.len() {
            return Err(Error::schema_mismatch(format!(
                "{} header rows in a grid of {} rows",
                self.header_rows,
                self.cells.len()
            )));
        }
        if self.header_columns > width {
            return Err(Error::schema_mismatch(format!(
                "{} index columns in a grid of {width} columns",
                self.header_columns
            )));
        }
        Ok(())
    }
}

impl Table for GridTable {
    fn header_rows(&self) -> usize {
        self.header_rows
    }

    fn header_columns(&self) -> usize {
        self.header_columns
    }

    fn rows(&self) -> usize {
        self.cells.len()
    }

    fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    fn cell(&self, row: usize, col: usize) -> Result<SourceCell> {
        check_bounds(self, row, col)?;
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(GridCell::to_source)
            .ok_or(Error::CellOutOfBounds {
                row,
                col,
                rows: self.rows(),
                columns: self.columns(),
            })
    }

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    fn styles(&self) -> Option<&str> {
        self.styles.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid_json() -> serde_json::Value {
        json!({
            "header_rows": 1,
            "header_columns": 1,
            "cells": [
                [{"type": "blank"}, {"type": "columns", "content": "foo"}],
                [{"type": "index", "content": 0}, {"type": "data", "content": 1.5}],
                [{"type": "index", "content": 1}, {"type": "data", "content": null}]
            ]
        })
    }

    #[test]
    fn test_deserialize_and_read() {
        let grid: GridTable = serde_json::from_value(grid_json()).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.cell(0, 1).unwrap().content.as_deref(), Some("foo"));
        assert_eq!(grid.cell(1, 0).unwrap().content.as_deref(), Some("0"));
        assert_eq!(grid.cell(1, 1).unwrap().content.as_deref(), Some("1.5"));
        assert_eq!(grid.cell(2, 1).unwrap().content, None);
        assert_eq!(grid.cell(0, 0).unwrap().content, None);
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let cells = vec![
            vec![GridCell {
                kind: "data".into(),
                content: None,
                class_names: None,
                id: None,
            }],
            Vec::new(),
        ];
        assert!(matches!(
            GridTable::new(0, 0, cells),
            Err(Error::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_deserialize_rejects_bad_shape() {
        let mut ragged = grid_json();
        ragged["cells"][2] = json!([{"type": "index", "content": 1}]);
        let err = serde_json::from_value::<GridTable>(ragged).unwrap_err();
        assert!(err.to_string().contains("grid row 2 has 1 cells"));

        let mut too_many_headers = grid_json();
        too_many_headers["header_rows"] = json!(4);
        assert!(serde_json::from_value::<GridTable>(too_many_headers).is_err());

        let mut too_many_index = grid_json();
        too_many_index["header_columns"] = json!(3);
        assert!(serde_json::from_value::<GridTable>(too_many_index).is_err());
    }

    #[test]
    fn test_header_rows_beyond_grid_rejected() {
        assert!(GridTable::new(2, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_empty_grid_is_valid() {
        let grid = GridTable::new(0, 0, Vec::new()).unwrap();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.columns(), 0);
        assert!(grid.cell(0, 0).is_err());
    }

    #[test]
    fn test_tags_are_not_interpreted() {
        let mut value = grid_json();
        value["cells"][1][1]["type"] = json!("dta");
        let grid: GridTable = serde_json::from_value(value).unwrap();
        assert_eq!(grid.cell(1, 1).unwrap().kind, "dta");
    }
}
