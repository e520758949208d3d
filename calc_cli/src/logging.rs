//! Logging setup for the CLI.
//!
//! Diagnostics go to stderr so that quotation output on stdout stays
//! machine-readable.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `warn`, or `debug`
/// for calc_core and the CLI when `verbose` is set.
pub fn init(verbose: bool) {
    let default = if verbose {
        "calc_core=debug,estimator=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_line_number(verbose)
        .try_init();
}
