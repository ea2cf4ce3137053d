//! Outbound host capabilities.
//!
//! The component only talks to its host through [`HostPort`]: a resize
//! request and a value report. Decoding never touches the host, so it runs
//! without one.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::payload::TablePayload;

/// Value reported back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    /// Selected data row ids, ascending.
    Selection(Vec<usize>),
    /// The unmodified table as received.
    Table(TablePayload),
}

/// Messages sent to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// The component finished its first mount.
    ComponentReady,
    /// Size the embedding frame; no height means fit content.
    SetFrameHeight {
        /// Requested height in pixels.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    /// Report a component value.
    SetComponentValue {
        /// The reported value.
        value: ComponentValue,
    },
}

/// Narrow outbound channel to the host.
pub trait HostPort {
    /// Ask the host to size the frame. Repeating a request is harmless.
    ///
    /// # Errors
    ///
    /// Transport errors.
    fn request_resize(&mut self, height: Option<u32>) -> Result<()>;

    /// Send a value to the host's component-value channel.
    ///
    /// # Errors
    ///
    /// Transport errors.
    fn report_value(&mut self, value: ComponentValue) -> Result<()>;

    /// Tell the host the component is ready.
    ///
    /// # Errors
    ///
    /// Transport errors.
    fn announce_ready(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Host port writing one JSON message per line.
#[derive(Debug)]
pub struct JsonLinesHost<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesHost<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write and flush one message.
    ///
    /// # Errors
    ///
    /// JSON and I/O errors.
    pub fn send(&mut self, message: &HostMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n").map_err(Error::io_no_path)?;
        self.writer.flush().map_err(Error::io_no_path)
    }

    /// Mutable access to the writer, for interleaving other output.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HostPort for JsonLinesHost<W> {
    fn request_resize(&mut self, height: Option<u32>) -> Result<()> {
        self.send(&HostMessage::SetFrameHeight { height })
    }

    fn report_value(&mut self, value: ComponentValue) -> Result<()> {
        self.send(&HostMessage::SetComponentValue { value })
    }

    fn announce_ready(&mut self) -> Result<()> {
        self.send(&HostMessage::ComponentReady)
    }
}

/// Host port keeping messages in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    messages: Vec<HostMessage>,
}

impl RecordingHost {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, in send order.
    pub fn messages(&self) -> &[HostMessage] {
        &self.messages
    }

    /// Heights of all resize requests.
    pub fn resize_requests(&self) -> Vec<Option<u32>> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                HostMessage::SetFrameHeight { height } => Some(*height),
                _ => None,
            })
            .collect()
    }

    /// All reported values.
    pub fn reported_values(&self) -> Vec<&ComponentValue> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                HostMessage::SetComponentValue { value } => Some(value),
                _ => None,
            })
            .collect()
    }
}

impl HostPort for RecordingHost {
    fn request_resize(&mut self, height: Option<u32>) -> Result<()> {
        self.messages.push(HostMessage::SetFrameHeight { height });
        Ok(())
    }

    fn report_value(&mut self, value: ComponentValue) -> Result<()> {
        self.messages.push(HostMessage::SetComponentValue { value });
        Ok(())
    }

    fn announce_ready(&mut self) -> Result<()> {
        self.messages.push(HostMessage::ComponentReady);
        Ok(())
    }
}
