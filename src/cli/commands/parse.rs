//! Parse command implementation
//!
//! Shows the overlay tree for a command line without touching any
//! configuration. Useful to see why a token was dropped or mistyped.

use std::path::Path;

use clap::Args;

use crate::cmdline::parse_cmdline_with_namespace;
use crate::config::defaults::NAMESPACE;
use crate::config::ConfigLoader;

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Namespace prefix tokens must carry
    #[arg(long, default_value = NAMESPACE)]
    pub namespace: String,

    /// Command line tokens; reads the kernel command line when empty
    #[arg(trailing_var_arg = true)]
    pub line: Vec<String>,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self, cmdline_path: &Path) -> anyhow::Result<i32> {
        let line = if self.line.is_empty() {
            match ConfigLoader::new().with_cmdline_path(cmdline_path).read_cmdline() {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return Ok(2);
                }
            }
        } else {
            self.line.join(" ")
        };

        let tree = parse_cmdline_with_namespace(line.trim(), &self.namespace);
        println!("{}", serde_json::to_string_pretty(&tree)?);
        Ok(0)
    }
}
