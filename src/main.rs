//! productive-table CLI
//!
//! Command-line interface for rendering and bridging table components.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    productive_table::cli::run()
}
