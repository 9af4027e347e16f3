//! Logger initialisation for the command-line tool

use crate::io::configuration::{DEFAULT_LOG_SPEC, QUIET_LOG_SPEC};
use crate::io::error::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Log specification used when `RUST_LOG` is unset
pub const fn default_log_spec(quiet: bool) -> &'static str {
    if quiet { QUIET_LOG_SPEC } else { DEFAULT_LOG_SPEC }
}

/// Start logging to stderr; `RUST_LOG` overrides the default level
///
/// The returned handle must be kept alive for the duration of the program.
///
/// # Errors
///
/// Returns an error if the log specification is invalid or a logger is
/// already installed
pub fn init_logging(quiet: bool) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(default_log_spec(quiet))?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}
