use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::{EmployeeGroup, ItemId, Numeric};

/// Factor catalog a criterion belongs to. Declaration order is registry order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
    #[serde(alias = "Qualitative")]
    Qualitative,
    #[serde(alias = "Quantitative")]
    Quantitative,
    #[serde(alias = "Recommended")]
    Recommended,
}

impl FactorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorType::Qualitative => "qualitative",
            FactorType::Quantitative => "quantitative",
            FactorType::Recommended => "recommended",
        }
    }
}

impl fmt::Display for FactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FactorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "qualitative" => Ok(FactorType::Qualitative),
            "quantitative" => Ok(FactorType::Quantitative),
            "recommended" => Ok(FactorType::Recommended),
            _ => Err(format!("Unknown factor type: {}", s)),
        }
    }
}

/// A scored evaluation criterion
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factor {
    pub id: ItemId,

    #[serde(default, alias = "factorName")]
    pub name: String,

    #[serde(default, rename = "type", alias = "factorType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FactorType>,

    #[serde(
        default,
        deserialize_with = "EmployeeGroup::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub evaluation_group: Option<EmployeeGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Qualitative only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks_level: Option<Numeric>,

    /// Quantitative only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<Numeric>,

    /// Quantitative only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_marks: Option<Numeric>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Factor {
    /// Evaluation group with a missing tag read as officer
    pub fn group(&self) -> EmployeeGroup {
        self.evaluation_group.unwrap_or(EmployeeGroup::Officer)
    }

    #[cfg(test)]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: None,
            evaluation_group: None,
            description: None,
            marks_level: None,
            total_marks: None,
            passing_marks: None,
            extra: Map::new(),
        }
    }

    #[cfg(test)]
    pub fn of_kind(mut self, kind: FactorType) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Body of a factor create or update from the catalog screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub factor_type: FactorType,
    pub evaluation_group: EmployeeGroup,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marks_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_marks: Option<String>,
}

impl FactorBody {
    /// Local catalog entry standing in for this body until the server confirms it
    pub fn to_factor(&self, id: ItemId) -> Factor {
        Factor {
            id,
            name: self.name.clone(),
            kind: Some(self.factor_type),
            evaluation_group: Some(self.evaluation_group),
            description: Some(self.description.clone()),
            marks_level: self.marks_level.clone().map(Numeric::Text),
            total_marks: self.total_marks.clone().map(Numeric::Text),
            passing_marks: self.passing_marks.clone().map(Numeric::Text),
            extra: Map::new(),
        }
    }
}
