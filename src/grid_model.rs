//! Named-column model for grid widgets.
//!
//! Grid widgets take `{ columns: [{name}], rows: [{<name>: text}] }` and do
//! their own sorting and selection on top of it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ShapePolicy;
use crate::error::{Error, Result};

/// Column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridColumn {
    /// Column name, also the key into each row.
    pub name: String,
}

/// One row keyed by column name, in column order.
///
/// Serializes as a JSON object. Repeated column names keep the position of
/// their first occurrence and the value of their last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GridRow {
    entries: IndexMap<String, String>,
}

impl GridRow {
    /// Insert or overwrite a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Value of a column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the row has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Columns plus keyed rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridModel {
    /// Column descriptors in source order.
    pub columns: Vec<GridColumn>,
    /// Rows in source order.
    pub rows: Vec<GridRow>,
}

impl GridModel {
    /// Zip header names with each data row.
    ///
    /// `rows` yields `(source_row, texts)`. Under [`ShapePolicy::Truncate`]
    /// each pair stops at the shorter side; under [`ShapePolicy::Reject`] any
    /// length difference fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] for a ragged row under
    /// [`ShapePolicy::Reject`].
    pub fn zip<I>(header: Vec<String>, rows: I, shape: ShapePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Vec<String>)>,
    {
        let mut model_rows = Vec::new();
        for (source_row, texts) in rows {
            if texts.len() != header.len() {
                match shape {
                    ShapePolicy::Reject => {
                        return Err(Error::ShapeMismatch {
                            header: header.len(),
                            row: source_row,
                            len: texts.len(),
                        });
                    }
                    ShapePolicy::Truncate => log::debug!(
                        "truncating row {source_row}: {} values for {} columns",
                        texts.len(),
                        header.len()
                    ),
                }
            }

            let mut row = GridRow::default();
            for (name, text) in header.iter().zip(texts) {
                row.insert(name.as_str(), text);
            }
            model_rows.push(row);
        }

        Ok(Self {
            columns: header.into_iter().map(|name| GridColumn { name }).collect(),
            rows: model_rows,
        })
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Serialize to the widget's JSON shape.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
