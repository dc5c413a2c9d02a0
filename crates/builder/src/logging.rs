use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Initialise the tracing subscriber
///
/// Logs go to stdout (with colors) and, when configured, to a log file
/// (without colors). `RUST_LOG` overrides the configured level.
pub fn initialize(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());

    let file_layer = match &config.file {
        Some(path) => {
            let path = std::path::Path::new(path);
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| anyhow::anyhow!("Cannot create log directory: {}", e))?;
            }
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", path.display(), e))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Arc::new(log_file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Tracing already initialized: {}", e))?;

    tracing::info!("Logging initialized at level {}", log_level);
    Ok(())
}
