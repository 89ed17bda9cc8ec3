mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use tracing::info;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            backend: BackendConfig::default(),
            state_dir: default_state_dir(),
            default_group: default_group(),
            paging: PagingConfig::default(),
            campaign_years: YearRangeConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.backend.base_url).map_err(|e| ConfigError::BaseUrl {
            url: self.backend.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl {
                url: self.backend.base_url.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        if self.paging.campaigns == 0 {
            return Err(ConfigError::PageSize("campaigns"));
        }
        if self.paging.factors == 0 {
            return Err(ConfigError::PageSize("factors"));
        }
        if self.paging.targets == 0 {
            return Err(ConfigError::PageSize("targets"));
        }

        Ok(())
    }
}
