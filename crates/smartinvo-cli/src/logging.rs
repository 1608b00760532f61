use is_terminal::IsTerminal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::LogLevel;

/// Where log lines go for this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget {
    Stderr,
    /// The dashboard owns the terminal; anything written would tear the frame
    Discard,
}

/// Directive used when `RUST_LOG` is unset: our crates at `level`,
/// everything else (reqwest, hyper) at warn or quieter.
pub(crate) fn default_directive(level: LogLevel) -> String {
    let others = match level {
        LogLevel::Error => "error",
        _ => "warn",
    };
    format!(
        "{others},smartinvo={level},smartinvo_runtime={level},smartinvo_backend={level}"
    )
}

/// Install the global subscriber. A second call is a no-op.
pub(crate) fn init(level: LogLevel, target: LogTarget) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(true),
            )
            .try_init(),
        LogTarget::Discard => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_scopes_our_crates() {
        assert_eq!(
            default_directive(LogLevel::Debug),
            "warn,smartinvo=debug,smartinvo_runtime=debug,smartinvo_backend=debug"
        );
        assert_eq!(
            default_directive(LogLevel::Error),
            "error,smartinvo=error,smartinvo_runtime=error,smartinvo_backend=error"
        );
    }

    #[test]
    fn test_every_level_parses_as_filter() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert!(EnvFilter::try_new(default_directive(level)).is_ok());
        }
    }
}
