//! Styling metadata attached to an Arrow table.

use super::batches::BatchSet;

/// Styling metadata produced alongside a data frame.
///
/// `styles` holds CSS rules addressing the generated cell ids
/// (`T_{uuid}row{r}_col{c}`). `display_values` optionally overrides the text
/// of data cells with pre-formatted strings and must match the data shape.
#[derive(Debug, Clone, Default)]
pub struct Styler {
    /// Namespace for generated ids.
    pub uuid: String,
    /// Table caption.
    pub caption: Option<String>,
    /// CSS rules.
    pub styles: Option<String>,
    /// Pre-formatted data values.
    pub display_values: Option<BatchSet>,
}

impl Styler {
    /// Create a styler with the given id namespace.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Self::default()
        }
    }

    /// Set the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set the CSS rules.
    #[must_use]
    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = Some(styles.into());
        self
    }

    /// Set pre-formatted display values.
    #[must_use]
    pub fn with_display_values(mut self, display_values: BatchSet) -> Self {
        self.display_values = Some(display_values);
        self
    }

    /// Style id of a data cell, in data coordinates.
    pub(crate) fn data_cell_id(&self, data_row: usize, data_col: usize) -> String {
        format!("T_{}row{data_row}_col{data_col}", self.uuid)
    }

    /// Style id of an index cell.
    pub(crate) fn index_cell_id(&self, level: usize, data_row: usize) -> String {
        format!("T_{}level{level}_row{data_row}", self.uuid)
    }

    /// Style id of a column header cell.
    pub(crate) fn header_cell_id(&self, level: usize, data_col: usize) -> String {
        format!("T_{}level{level}_col{data_col}", self.uuid)
    }
}
