//! Dump command implementation
//!
//! Loads the configuration exactly as the bootstrap would and prints it.

use std::path::Path;

use clap::Args;

use crate::config::ConfigLoader;
use crate::logging::Verbosity;

/// Arguments for the dump command
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// `rancher.*` tokens applied after the kernel command line
    #[arg(trailing_var_arg = true)]
    pub overrides: Vec<String>,
}

impl DumpArgs {
    /// Execute the dump command
    pub fn execute(&self, cmdline_path: &Path, verbosity: &dyn Verbosity) -> anyhow::Result<i32> {
        let loader = ConfigLoader::new()
            .with_cmdline_path(cmdline_path)
            .with_args(self.overrides.iter().cloned());

        tracing::info!(
            cmdline = %loader.cmdline_path().display(),
            overrides = self.overrides.len(),
            "Loading configuration"
        );

        let config = match loader.load(verbosity) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("{}", config.dump()?);
        Ok(0)
    }
}
