//! Renderers for decoded tables.
//!
//! Both renderers consume a [`DecodedTable`](crate::adapter::DecodedTable)
//! and never look at the source format.

pub mod html;
pub mod text;

pub use html::{error_html, to_html};
pub use text::to_text;
