//! Init step runner
//!
//! Bootstrap work after configuration loading is a flat list of steps that
//! each read the loaded [`Config`]. They run strictly in order and the first
//! failure stops the run.
//!
//! ```rust
//! use rancher_config::config::Config;
//! use rancher_config::init::{run_init_funcs, InitFunc};
//!
//! let steps: Vec<InitFunc> = vec![
//!     Box::new(|cfg: &Config| {
//!         anyhow::ensure!(!cfg.console_container.is_empty(), "no console container");
//!         Ok(())
//!     }),
//!     Box::new(|_cfg: &Config| Ok(())),
//! ];
//!
//! run_init_funcs(&Config::default(), &steps).unwrap();
//! ```

use crate::config::Config;
use crate::log_step_progress;

/// One bootstrap step
pub type InitFunc = Box<dyn Fn(&Config) -> anyhow::Result<()>>;

/// Runs `init_funcs` in order against `cfg`
///
/// # Errors
///
/// Returns the first step failure unchanged; later steps are not run.
pub fn run_init_funcs(cfg: &Config, init_funcs: &[InitFunc]) -> anyhow::Result<()> {
    let total = init_funcs.len();

    for (i, init_func) in init_funcs.iter().enumerate() {
        let step = i + 1;
        tracing::debug!(step, total, "[{}/{}] Starting", step, total);

        if let Err(e) = init_func(cfg) {
            log_step_progress!(error, step, total, "Failed");
            return Err(e);
        }

        log_step_progress!(debug, step, total, "Done");
    }

    Ok(())
}
