//! productive-table - Arrow table decoding for embedded table components
//!
//! Decodes a serialized data frame (Arrow IPC streams or a pre-classified
//! cell grid) into ordered, role-classified cells, and hands them to a
//! renderer or a grid widget model. A narrow host port carries the only
//! outbound messages: a resize request and a value report.
//!
//! # Design Principles
//!
//! 1. **Position decides role** - blank, index, column header or data is a
//!    function of the table layout, never of cell content
//! 2. **No partial tables** - a cell that fails to decode fails the render
//! 3. **Pure decoding** - synchronous, deterministic, no host access
//! 4. **Arrow native** - Arrow 53 `RecordBatch` and IPC throughout
//!
//! # Quick Start
//!
//! ```
//! use productive_table::{HostConfig, TableAdapter};
//!
//! let config = HostConfig::from_json(r#"{
//!     "data": {
//!         "format": "grid",
//!         "header_rows": 1,
//!         "header_columns": 1,
//!         "cells": [
//!             [{"type": "blank"}, {"type": "columns", "content": "foo"}],
//!             [{"type": "index", "content": 0}, {"type": "data", "content": "hey"}]
//!         ]
//!     },
//!     "show_index": true
//! }"#)?;
//!
//! let table = config.data.decode()?;
//! let decoded = TableAdapter::default().decode(table.as_ref(), &config.options)?;
//! assert_eq!(decoded.body[0].texts().collect::<Vec<_>>(), vec!["0", "hey"]);
//!
//! let html = productive_table::render::to_html(&decoded);
//! assert!(html.contains("<td>hey</td>"));
//! # Ok::<(), productive_table::Error>(())
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::redundant_clone,
        clippy::needless_collect,
        clippy::too_many_lines,
        clippy::similar_names
    )
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod cell;
/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod grid_model;
pub mod host;
pub mod payload;
pub mod render;
pub mod table;

// Re-exports for convenience
pub use adapter::{DecodedTable, TableAdapter};
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use cell::{CellRole, CellView, RowView};
pub use component::{Component, ComponentState, Rendered};
pub use config::{
    DisplayOptions, IndexVisibility, MissingValuePolicy, RenderPolicy, ReportTrigger, ShapePolicy,
};
pub use error::{Error, Result};
pub use grid_model::{GridColumn, GridModel, GridRow};
pub use host::{ComponentValue, HostMessage, HostPort, JsonLinesHost, RecordingHost};
pub use payload::{ArrowPayload, HostConfig, StylerPayload, TablePayload};
pub use table::{ArrowTable, GridTable, Table};
