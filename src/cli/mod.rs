//! CLI interface and argument parsing
//!
//! The binary is a diagnostic front end for the loader: it shows how a
//! command line is parsed and what configuration results from it.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::defaults::CMDLINE_PATH;

/// rancher-config - bootstrap configuration from the kernel command line
#[derive(Parser, Debug)]
#[command(name = "rancher-config")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the kernel command line
    #[arg(long, global = true, default_value = CMDLINE_PATH, env = "RANCHER_CMDLINE")]
    pub cmdline: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "RANCHER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text, env = "RANCHER_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Log line encoding on stderr
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn is_json(self) -> bool {
        self == LogFormat::Json
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the configuration and print it
    Dump(commands::dump::DumpArgs),

    /// Print the overlay tree a command line produces
    Parse(commands::parse::ParseArgs),
}
