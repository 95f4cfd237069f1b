use crate::error::HeusticsResult;
pub use tracing_subscriber::filter::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber: formatted events on stderr at `level`, plus span
/// capture for error traces.
///
/// Stdout stays reserved for program output. Fails if a global subscriber is already set.
pub fn init_tracing(level: LevelFilter) -> HeusticsResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| crate::err!("Failed to install tracing subscriber: {}", e))
}

/// Maps a conventional level name to a filter.
///
/// Accepts `CRITICAL`, `ERROR`, `WARNING`, `WARN`, `INFO`, `DEBUG`, `NOTSET` and `TRACE`,
/// ignoring case and surrounding whitespace.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_uppercase().as_str() {
        "CRITICAL" | "ERROR" => Some(LevelFilter::ERROR),
        "WARNING" | "WARN" => Some(LevelFilter::WARN),
        "INFO" => Some(LevelFilter::INFO),
        "DEBUG" => Some(LevelFilter::DEBUG),
        "NOTSET" | "TRACE" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

/// Reads the level from environment variable `var`, falling back to `default` when it is
/// unset or not a known level name.
pub fn level_from_env(var: &str, default: LevelFilter) -> LevelFilter {
    std::env::var(var)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(default)
}
