//! Tracing setup for the twinfit binary.
//!
//! Diagnostics go to stderr so command output on stdout can be piped.
//! `RUST_LOG` always wins over the level picked here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when `RUST_LOG` is unset
pub fn default_level(quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else {
        "info"
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_only_keeps_warnings() {
        assert_eq!(default_level(true), "warn");
        assert_eq!(default_level(false), "info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(true);
        init(false);
    }
}
