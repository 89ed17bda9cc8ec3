use serde::{Deserialize, Serialize};

use super::{ItemId, Numeric};

/// A per-employee goal recorded against a campaign
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<ItemId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_campaign_id: Option<ItemId>,

    #[serde(default)]
    pub target_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks_obtained: Option<Numeric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTarget {
    pub employee_id: ItemId,
    pub evaluation_campaign_id: ItemId,
    pub target_name: String,
    pub description: String,
    pub achievement: String,
    pub total_marks: Option<i64>,
    pub marks_obtained: Option<i64>,
}
