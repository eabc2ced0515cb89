use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validator;

use crate::cli::Cli;
use crate::domain::naming::DEFAULT_COLUMN_NAME_PATTERN;

/// Prefix of environment overrides, e.g. `ETL_STUDIO__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "ETL_STUDIO";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub sqllab: SqlLabSettings,
    #[serde(default)]
    pub etl: EtlSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Values the SQL Lab page hands to the ETL dialog
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SqlLabSettings {
    /// Seconds before the explore view gives up on a query
    #[serde(default = "default_webserver_timeout")]
    pub webserver_timeout: u64,
    /// Shown to the user when creating a data source fails
    #[serde(default = "default_etl_error_message")]
    pub etl_error_message: String,
}

impl Default for SqlLabSettings {
    fn default() -> Self {
        Self {
            webserver_timeout: default_webserver_timeout(),
            etl_error_message: default_etl_error_message(),
        }
    }
}

fn default_webserver_timeout() -> u64 {
    60
}

fn default_etl_error_message() -> String {
    "Failed to create the ETL data source".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EtlSettings {
    /// Regex every column name of a new data source must match
    #[serde(default = "default_column_name_pattern")]
    pub column_name_pattern: String,
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: u32,
}

impl Default for EtlSettings {
    fn default() -> Self {
        Self {
            column_name_pattern: default_column_name_pattern(),
            max_chunk_size: default_max_chunk_size(),
        }
    }
}

fn default_column_name_pattern() -> String {
    DEFAULT_COLUMN_NAME_PATTERN.to_string()
}

fn default_max_chunk_size() -> u32 {
    1_000_000
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiSettings {
    /// Directory holding the built Web UI
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
        }
    }
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("ui/dist")
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `etl-studio.toml` from `root`, if present
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("etl-studio.toml");
        let settings = Self::load(&config_path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(config_path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
