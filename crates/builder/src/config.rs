use serde::Deserialize;
use std::path::{Path, PathBuf};

use contracts::shared::documents::{FORM_STORAGE_KEY, LOGIC_STORAGE_KEY};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    pub dir: String,
    #[serde(default = "default_form_key")]
    pub form_key: String,
    #[serde(default = "default_logic_key")]
    pub logic_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Optional log file, written without ANSI colors
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_form_key() -> String {
    FORM_STORAGE_KEY.to_string()
}

fn default_logic_key() -> String {
    LOGIC_STORAGE_KEY.to_string()
}

fn default_level() -> String {
    "info".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[storage]
dir = "target/portico"

[logging]
level = "info"
"#;

/// Load configuration from portico.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("portico.toml");

            if config_path.exists() {
                return load_config_from(&config_path);
            } else {
                tracing::debug!("portico.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Load configuration from an explicit file
pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from: {}", path.display());
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Get the storage directory from configuration
/// Resolves relative paths relative to the executable directory
pub fn resolve_storage_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.storage.dir);

    if dir.is_absolute() {
        return dir.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(dir);
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(&config.storage.dir)
}
