use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming a log file. When unset, logs go to stderr.
pub const LOG_FILE_ENV: &str = "ITEMDESK_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG` (default `warn`, or `debug` when
/// `verbose`). Set `ITEMDESK_LOG` to a file path to write logs there instead
/// of stderr, keeping stdout clean for command output.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let file = std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .and_then(|path| match std::fs::File::create(&path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("Warning: Failed to create log file {}: {}", path, e);
                None
            }
        });

    match file {
        Some(file) => {
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
        None => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339());
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
        }
    }
}
