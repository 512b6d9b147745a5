// shutter/src/logger.rs
//! Logging setup for the `shutter` binary.
//!
//! Library crates only emit through the `log` facade; the binary decides
//! where records go. `env_logger` honours `RUST_LOG` unless the command line
//! forces a level with `--quiet` or `--debug`.

use env_logger::{Builder, Env};
use log::LevelFilter;

const DEFAULT_FILTER: &str = "warn";

/// Initializes the global logger. Safe to call more than once.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    // A second initialization (e.g. from tests) is not an error worth reporting.
    let _ = builder.try_init();
}

/// Maps the global CLI flags to a level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
