//! Diagnostic logging setup for the command-line tool.
//!
//! Logs go to standard error so they never mix with generated code written
//! to standard output.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Level used in verbose mode.
pub const VERBOSE_LEVEL: &str = "debug";

/// Builds the log filter.
///
/// Verbose mode always logs at debug level; otherwise `RUST_LOG` is honored
/// and falls back to warnings only.
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_LEVEL);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global tracing subscriber.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter() {
        assert_eq!(env_filter(true).to_string(), VERBOSE_LEVEL);
    }

    #[test]
    fn test_init_twice_fails() {
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }
}
