//! Display options and render policies.
//!
//! [`DisplayOptions`] arrive with every host configuration. [`RenderPolicy`]
//! is fixed per deployment: it settles how missing values look, whether
//! index cells are rendered, how ragged grid models are handled and when a
//! value is reported back to the host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-configuration display flags sent by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Render the index column(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_index: Option<bool>,
    /// Exclude the first column from the decoded grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_first_col: Option<bool>,
}

impl DisplayOptions {
    /// Options that show everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the show-index flag.
    #[must_use]
    pub fn with_show_index(mut self, show: bool) -> Self {
        self.show_index = Some(show);
        self
    }

    /// Set the skip-first-column flag.
    #[must_use]
    pub fn with_skip_first_col(mut self, skip: bool) -> Self {
        self.skip_first_col = Some(skip);
        self
    }

    /// Whether the leading index column(s) take part in decoding.
    ///
    /// Absent flags default to showing everything; either flag alone is
    /// enough to drop the column.
    #[must_use]
    pub fn include_index_column(&self) -> bool {
        !self.skip_first_col.unwrap_or(false) && self.show_index.unwrap_or(true)
    }
}

/// Text used for cells without content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "marker", rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Replace absent content with a marker string.
    Marker(String),
    /// Render absent content as an empty string.
    Empty,
}

impl Default for MissingValuePolicy {
    fn default() -> Self {
        Self::Marker("N/A".to_string())
    }
}

impl MissingValuePolicy {
    /// Resolve optional content to display text.
    #[must_use]
    pub fn resolve(&self, content: Option<String>) -> String {
        match (content, self) {
            (Some(text), _) => text,
            (None, Self::Marker(marker)) => marker.clone(),
            (None, Self::Empty) => String::new(),
        }
    }
}

/// How blank and index cells are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexVisibility {
    /// Keep blank and index cells; blank cells render as empty header cells.
    #[default]
    RenderEmpty,
    /// Drop blank and index cells from decoded rows.
    Omit,
}

/// Handling of data rows whose length differs from the header row when a
/// named-column grid model is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapePolicy {
    /// Zip header and row, stopping at the shorter one.
    #[default]
    Truncate,
    /// Fail with a shape mismatch error.
    Reject,
}

/// When the component reports a value to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTrigger {
    /// Never report.
    Never,
    /// Report the unmodified table once per configuration, at mount.
    OnMount,
    /// Report the selected row ids whenever the selection changes.
    #[default]
    OnSelectionChange,
}

/// Deployment-wide rendering decisions, resolved once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderPolicy {
    /// Missing-value text.
    pub missing_value: MissingValuePolicy,
    /// Blank/index cell treatment.
    pub index_visibility: IndexVisibility,
    /// Grid model shape handling.
    pub shape: ShapePolicy,
    /// Host value reporting.
    pub report: ReportTrigger,
    /// Fixed frame height; `None` lets the host auto-size.
    pub frame_height: Option<u32>,
}

impl RenderPolicy {
    /// Set the missing-value policy.
    #[must_use]
    pub fn with_missing_value(mut self, policy: MissingValuePolicy) -> Self {
        self.missing_value = policy;
        self
    }

    /// Set the index visibility policy.
    #[must_use]
    pub fn with_index_visibility(mut self, visibility: IndexVisibility) -> Self {
        self.index_visibility = visibility;
        self
    }

    /// Set the shape policy.
    #[must_use]
    pub fn with_shape(mut self, shape: ShapePolicy) -> Self {
        self.shape = shape;
        self
    }

    /// Set the report trigger.
    #[must_use]
    pub fn with_report(mut self, report: ReportTrigger) -> Self {
        self.report = report;
        self
    }

    /// Set a fixed frame height.
    #[must_use]
    pub fn with_frame_height(mut self, height: u32) -> Self {
        self.frame_height = Some(height);
        self
    }

    /// Parse a policy from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a JSON error for malformed input and
    /// [`Error::InvalidConfig`] for a zero frame height.
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a JSON file.
    ///
    /// # Errors
    ///
    /// I/O errors carry the path; parse errors as in
    /// [`RenderPolicy::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.frame_height == Some(0) {
            return Err(Error::invalid_config("frame_height must be positive"));
        }
        Ok(())
    }
}
