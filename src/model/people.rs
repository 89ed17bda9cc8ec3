use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::{ItemId, Numeric};

/// Employee group a campaign or factor targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeGroup {
    #[serde(alias = "Staff")]
    Staff,
    #[serde(alias = "Officer")]
    Officer,
}

impl EmployeeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeGroup::Staff => "staff",
            EmployeeGroup::Officer => "officer",
        }
    }

    /// Map free-form backend values onto a group; anything unrecognised is an officer
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "staff" => EmployeeGroup::Staff,
            _ => EmployeeGroup::Officer,
        }
    }

    /// `deserialize_with` adapter that never fails on unknown group labels
    pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Self>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::normalize(Some(&s))))
    }
}

impl fmt::Display for EmployeeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EmployeeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "staff" => Ok(EmployeeGroup::Staff),
            "officer" => Ok(EmployeeGroup::Officer),
            _ => Err(format!("Unknown employee group: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: ItemId,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    /// Remaining domain fields, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Employee {
    #[cfg(test)]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: None,
            designation: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluator {
    pub id: ItemId,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Evaluation level 1..=5, edited locally in the wizard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Numeric>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Evaluator {
    #[cfg(test)]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: None,
            email: None,
            department: None,
            role: None,
            level: None,
            extra: Map::new(),
        }
    }

    #[cfg(test)]
    pub fn with_level(mut self, level: impl Into<Numeric>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Name to show in listings; falls back to the username
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.username.as_deref().unwrap_or("")
        } else {
            &self.name
        }
    }

    /// Case-insensitive match on name, username, email or department
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            Some(self.name.as_str()),
            self.username.as_deref(),
            self.email.as_deref(),
            self.department.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}
