//! Log filter selection

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Build the log filter from `RUST_LOG`-style directives
///
/// Directives from the environment take precedence. When they are absent,
/// blank or unparsable, the filter falls back to INFO, or DEBUG with
/// `--verbose`.
pub fn log_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level.as_str().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(log_filter(None, false).to_string(), "info");
        assert_eq!(log_filter(None, true).to_string(), "debug");
    }

    #[test]
    fn test_env_directives_win_over_verbose() {
        assert_eq!(log_filter(Some("warn"), true).to_string(), "warn");
        assert_eq!(
            log_filter(Some("recipient_router=trace"), false).to_string(),
            "recipient_router=trace"
        );
    }

    #[test]
    fn test_blank_directives_fall_back() {
        assert_eq!(log_filter(Some("  "), true).to_string(), "debug");
    }
}
