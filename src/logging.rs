use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file path.
pub const LOG_FILE_ENV_VAR: &str = "TRAVEL_PILOT_LOG";

/// Initialize tracing.
///
/// `RUST_LOG` takes precedence; otherwise the level is `warn`, or `debug`
/// when `verbose` is set. Output goes to stderr so stdout stays reserved
/// for the rendered result.
///
/// Set `TRAVEL_PILOT_LOG` to a file path to log there instead. Log files
/// get unique names, `{path}.{timestamp}.{pid}`, so concurrent runs don't
/// clobber each other. If the file can't be created, logs go to stderr.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let Some(log_path) = std::env::var(LOG_FILE_ENV_VAR).ok() else {
        init_stderr(filter);
        return;
    };

    let unique_path = unique_log_path(&log_path);

    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(err) => {
            init_stderr(filter);
            tracing::warn!(
                path = %unique_path,
                error = %err,
                "Failed to create log file, logging to stderr"
            );
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn init_stderr(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
