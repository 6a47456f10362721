use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub mod defaults;

use crate::errors::AppError;
use crate::models::{BulkCreateOptions, ChannelNamingOptions, NormalizationOptions};
use crate::normalization::{NameNormalizer, RuleTables};

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Defaults for the normalization options of every run
    #[serde(default)]
    pub normalization: NormalizationOptions,
    #[serde(default)]
    pub naming: ChannelNamingOptions,
    #[serde(default)]
    pub import: ImportConfig,
    /// Replacement tag tables; omitted tables keep their built-in values
    #[serde(default)]
    pub rules: RuleTables,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportConfig {
    #[serde(default = "default_starting_number")]
    pub starting_number: u32,
    #[serde(default)]
    pub channel_group_id: Option<i64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            starting_number: default_starting_number(),
            channel_group_id: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if Path::new(config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.import.starting_number == 0 {
            return Err(AppError::configuration(
                "import.starting_number must be at least 1",
            ));
        }
        self.rules.validate()?;
        Ok(())
    }

    /// Normalizer compiled from the configured rule tables
    pub fn build_normalizer(&self) -> Result<NameNormalizer, AppError> {
        Ok(NameNormalizer::new(self.rules.clone())?)
    }

    pub fn bulk_options(&self) -> BulkCreateOptions {
        BulkCreateOptions {
            normalization: self.normalization.clone(),
            naming: self.naming.clone(),
        }
    }
}
