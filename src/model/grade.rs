use serde::{Deserialize, Serialize};

use super::{ItemId, Numeric};

/// One band of the grading scale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(default)]
    pub grade: String,

    #[serde(default)]
    pub expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_marks: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_marks: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrade {
    pub grade: String,
    pub expression: String,
    pub start_marks: f64,
    pub end_marks: f64,
    pub remarks: String,
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdate {
    pub id: ItemId,
    pub grade: String,
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_marks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_marks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
