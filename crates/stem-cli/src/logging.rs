use tracing_subscriber::EnvFilter;

use crate::cli::LogFlags;

/// Environment variable that overrides the level chosen by the flags.
pub const LOG_ENV: &str = "STEMNET_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays
/// reserved for reports and progress lines.
pub fn init_tracing(flags: LogFlags) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(flags)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

const fn default_level(flags: LogFlags) -> &'static str {
    if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    }
}
