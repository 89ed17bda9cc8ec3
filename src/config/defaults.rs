use crate::model::EmployeeGroup;
use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

pub fn default_timeout_sec() -> u64 {
    30
}

pub fn default_state_dir() -> PathBuf {
    PathBuf::from(".appraise")
}

pub fn default_group() -> EmployeeGroup {
    EmployeeGroup::Staff
}

pub fn default_campaign_rows() -> usize {
    3
}

pub fn default_factor_rows() -> usize {
    5
}

pub fn default_target_rows() -> usize {
    5
}

pub fn default_first_year() -> i32 {
    2020
}

pub fn default_year_count() -> u32 {
    10
}
