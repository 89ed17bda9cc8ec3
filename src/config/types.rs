use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::*;
use crate::model::EmployeeGroup;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Directory holding the session token slot
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Employee group loaded when the wizard starts
    #[serde(default = "default_group")]
    pub default_group: EmployeeGroup,

    #[serde(default)]
    pub paging: PagingConfig,

    #[serde(default)]
    pub campaign_years: YearRangeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_sec: default_timeout_sec(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

/// Rows per page for each listing screen
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PagingConfig {
    #[serde(default = "default_campaign_rows")]
    pub campaigns: usize,

    #[serde(default = "default_factor_rows")]
    pub factors: usize,

    #[serde(default = "default_target_rows")]
    pub targets: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            campaigns: default_campaign_rows(),
            factors: default_factor_rows(),
            targets: default_target_rows(),
        }
    }
}

/// Years offered by the campaign form
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct YearRangeConfig {
    #[serde(default = "default_first_year")]
    pub first: i32,

    #[serde(default = "default_year_count")]
    pub count: u32,
}

impl Default for YearRangeConfig {
    fn default() -> Self {
        Self {
            first: default_first_year(),
            count: default_year_count(),
        }
    }
}

impl YearRangeConfig {
    pub fn years(&self) -> Vec<i32> {
        (0..self.count as i32).map(|i| self.first + i).collect()
    }
}
