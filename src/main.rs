// rancher-config - Bootstrap configuration from the kernel command line
// Copyright (c) 2025 rancher-config Contributors
// Licensed under the MIT License

use clap::Parser;
use rancher_config::cli::{Cli, Commands};
use rancher_config::logging::{init_logging, LoggingHandle};
use std::process;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging = match init_logging(log_level, cli.log_format.is_json()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "rancher-config");

    // Execute command and get exit code
    let exit_code = match execute_command(&cli, &logging) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, logging: &LoggingHandle) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Dump(args) => args.execute(&cli.cmdline, logging),
        Commands::Parse(args) => args.execute(&cli.cmdline),
    }
}
