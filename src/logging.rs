//! Logging setup
//!
//! Logs go to stderr so command output on stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the command-line level.

use tracing_subscriber::EnvFilter;

/// Map CLI level names (including the aliases the CLI accepts) onto tracing levels
fn normalize_level(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" | "verbose" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => "warn",
    }
}

/// Install the global subscriber
pub fn init(verbose: bool, json_output: bool, log_level: Option<&str>) -> anyhow::Result<()> {
    let level = match (log_level, verbose) {
        (Some(level), _) => normalize_level(level),
        (None, true) => "debug",
        (None, false) => "warn",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rfclient={}", level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if json_output {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("{}", e))
}
