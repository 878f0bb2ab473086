//! Configuration: defaults, optional TOML file, `SNOMED_IMPORTER__*` environment, CLI flags

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;
use snomed_import::ImportSettings;

const DEFAULT_CONFIG_FILE: &str = "snomed-importer";
const ENV_PREFIX: &str = "SNOMED_IMPORTER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub import: ImportSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub base_path: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:16043".to_string(),
            base_path: "/rest/v1".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl ApiConfig {
    /// Root of the code endpoints.
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.base_path.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Also write logs to daily-rotated files in this directory
    pub file_directory: Option<String>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_directory: None,
            file_prefix: "snomed-importer".to_string(),
        }
    }
}

impl Config {
    /// Load defaults, then the config file, then the environment.
    ///
    /// Without `path`, `snomed-importer.toml` in the working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_environment(path, environment())
    }

    fn load_with_environment(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Apply the flags given on the command line.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(page_size) = cli.page_size {
            self.import.page_size = page_size;
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        if cli.log_json {
            self.logging.json = true;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        if self.api.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be greater than 0".to_string());
        }
        if self.import.page_size == 0 {
            return Err("import.page_size must be greater than 0".to_string());
        }
        for (key, value) in [
            ("import.region", &self.import.region),
            ("import.code_type", &self.import.code_type),
            ("import.link_version", &self.import.link_version),
        ] {
            if value.is_empty() || value.contains('|') {
                return Err(format!("{key} must be non-empty and must not contain '|'"));
            }
        }
        Ok(())
    }
}

/// `SNOMED_IMPORTER__IMPORT__PAGE_SIZE=50` sets `import.page_size`.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
