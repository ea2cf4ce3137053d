//! productive-table CLI
//!
//! Renders host configurations from files and bridges a host over JSON lines.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::config::RenderPolicy;

mod bridge;
mod render;

pub use bridge::{run_bridge, BridgeOutput, BridgeRequest};

/// productive-table - Arrow table decoding for embedded table components
#[derive(Parser)]
#[command(name = "productive-table")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a host configuration file and print it
    Render {
        /// Path to the host configuration (JSON)
        config: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
        /// Render policy file (JSON)
        #[arg(short, long)]
        policy: Option<PathBuf>,
        /// Maximum line width for text output
        #[arg(short, long, default_value = "80")]
        width: usize,
    },
    /// Act as a component: read host messages on stdin, answer on stdout
    Bridge {
        /// Render policy file (JSON)
        #[arg(short, long)]
        policy: Option<PathBuf>,
    },
}

/// Output formats of the `render` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// HTML table fragment
    Html,
    /// Grid widget model (JSON)
    Grid,
    /// Fixed-width text
    Text,
}

/// Run the productive-table CLI.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            config,
            format,
            policy,
            width,
        } => load_policy(policy.as_ref())
            .and_then(|policy| render::cmd_render(&config, format, policy, width)),
        Commands::Bridge { policy } => {
            load_policy(policy.as_ref()).and_then(bridge::cmd_bridge)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A logger may already be installed when embedded.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn load_policy(path: Option<&PathBuf>) -> crate::Result<RenderPolicy> {
    match path {
        Some(path) => RenderPolicy::from_path(path),
        None => Ok(RenderPolicy::default()),
    }
}
