//! Host configuration payloads.
//!
//! The host delivers `{ data, show_index?, skip_first_col? }` as JSON. The
//! table travels either as base64 Arrow IPC streams or as a pre-classified
//! cell grid.

use arrow::array::RecordBatch;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::DisplayOptions;
use crate::error::Result;
use crate::table::{read_ipc_stream, write_ipc_stream, ArrowTable, GridTable, Styler, Table};

/// One host configuration update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Serialized table.
    pub data: TablePayload,
    /// Display flags.
    #[serde(flatten)]
    pub options: DisplayOptions,
}

impl HostConfig {
    /// Configuration with default display options.
    pub fn new(data: TablePayload) -> Self {
        Self {
            data,
            options: DisplayOptions::default(),
        }
    }

    /// Replace the display options.
    #[must_use]
    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns a JSON error for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serialized table, tagged by `format`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum TablePayload {
    /// Arrow IPC streams.
    Arrow(ArrowPayload),
    /// Pre-classified cells.
    Grid(GridTable),
}

impl TablePayload {
    /// Build the table this payload describes.
    ///
    /// # Errors
    ///
    /// Base64, Arrow and schema errors from an Arrow payload.
    pub fn decode(&self) -> Result<Box<dyn Table>> {
        match self {
            Self::Arrow(payload) => Ok(Box::new(payload.decode()?)),
            Self::Grid(grid) => Ok(Box::new(grid.clone())),
        }
    }
}

/// Base64 Arrow IPC parts of a data frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowPayload {
    /// Data values.
    pub data: String,
    /// Index levels, one column per level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Column header levels, one row per level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<String>,
    /// Styling metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styler: Option<StylerPayload>,
}

/// Serialized [`Styler`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylerPayload {
    /// Id namespace.
    #[serde(default)]
    pub uuid: String,
    /// Caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// CSS rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<String>,
    /// Base64 Arrow IPC stream of pre-formatted data values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_values: Option<String>,
}

impl ArrowPayload {
    /// Encode a data batch.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if the batch cannot be written.
    pub fn from_batch(batch: &RecordBatch) -> Result<Self> {
        Ok(Self {
            data: encode_batch(batch)?,
            index: None,
            columns: None,
            styler: None,
        })
    }

    /// Attach an encoded index batch.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if the batch cannot be written.
    pub fn with_index(mut self, index: &RecordBatch) -> Result<Self> {
        self.index = Some(encode_batch(index)?);
        Ok(self)
    }

    /// Attach an encoded column header batch.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if the batch cannot be written.
    pub fn with_columns(mut self, columns: &RecordBatch) -> Result<Self> {
        self.columns = Some(encode_batch(columns)?);
        Ok(self)
    }

    /// Attach styling metadata.
    #[must_use]
    pub fn with_styler(mut self, styler: StylerPayload) -> Self {
        self.styler = Some(styler);
        self
    }

    /// Decode all parts into an [`ArrowTable`].
    ///
    /// # Errors
    ///
    /// Base64 and Arrow errors, and schema mismatches between the parts.
    pub fn decode(&self) -> Result<ArrowTable> {
        let mut table = ArrowTable::new(decode_stream(&self.data)?);
        if let Some(index) = &self.index {
            table = table.with_index(decode_stream(index)?)?;
        }
        if let Some(columns) = &self.columns {
            table = table.with_column_headers(decode_stream(columns)?)?;
        }
        if let Some(styler) = &self.styler {
            let mut decoded = Styler::new(styler.uuid.clone());
            decoded.caption = styler.caption.clone();
            decoded.styles = styler.styles.clone();
            if let Some(values) = &styler.display_values {
                decoded = decoded.with_display_values(decode_stream(values)?);
            }
            table = table.with_styler(decoded)?;
        }
        Ok(table)
    }
}

fn encode_batch(batch: &RecordBatch) -> Result<String> {
    let bytes = write_ipc_stream(batch.schema().as_ref(), std::slice::from_ref(batch))?;
    Ok(STANDARD.encode(bytes))
}

fn decode_stream(encoded: &str) -> Result<crate::table::BatchSet> {
    let bytes = STANDARD.decode(encoded.trim())?;
    read_ipc_stream(&bytes)
}
