use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

pub const DEFAULT_FILTER: &str = "stratplan=warn";

/// Filter from `STRATPLAN_LOG`, falling back to [`DEFAULT_FILTER`] when unset or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Output goes to stderr so stdout stays
/// reserved for command results. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
