use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "GDCLJ_LOG";

/// Install a stderr subscriber filtered by `GDCLJ_LOG` (default `info`).
///
/// Leaves an already installed global subscriber in place.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        // The host or an earlier load owns the global subscriber.
        tracing::debug!(error = %e, "Keeping existing tracing subscriber");
    }
}
