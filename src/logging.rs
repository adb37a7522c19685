//! Tracing subscriber setup for the CLI.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{NotekeepError, Result};

/// Environment variable read when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "NOTEKEEP_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
///
/// `RUST_LOG` or `NOTEKEEP_LOG` win over the flags; otherwise `log_level`
/// wins over `verbose`, and the default is `notekeep=info`.
pub fn init_tracing(verbose: bool, log_level: Option<&str>, log_json: bool) -> Result<()> {
    let directive = filter_directive(verbose, log_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };

    installed.map_err(|e| NotekeepError::Logging(e.to_string()))
}

fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("notekeep={}", level),
        (true, None) => "notekeep=debug".to_string(),
        (false, None) => "notekeep=info".to_string(),
    }
}
