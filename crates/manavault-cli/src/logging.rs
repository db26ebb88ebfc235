// Logging and verbosity control

use tracing::Level;

/// Pick the log level from CLI flags, falling back to the configured level.
///
/// `--quiet` wins over `--verbose`.
pub fn resolve_level(verbose: bool, quiet: bool, configured: &str) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        configured.parse().unwrap_or(Level::INFO)
    }
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_beats_verbose() {
        assert_eq!(resolve_level(true, true, "trace"), Level::ERROR);
    }

    #[test]
    fn test_verbose() {
        assert_eq!(resolve_level(true, false, "warn"), Level::DEBUG);
    }

    #[test]
    fn test_configured_level() {
        assert_eq!(resolve_level(false, false, "warn"), Level::WARN);
        assert_eq!(resolve_level(false, false, "TRACE"), Level::TRACE);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(resolve_level(false, false, "chatty"), Level::INFO);
    }
}
