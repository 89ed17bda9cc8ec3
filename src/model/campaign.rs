use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{lenient, EmployeeGroup, Employee, Evaluator, Factor, ItemId, Numeric};

/// Campaign status: the registry screen stores an active flag, the wizard a label
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CampaignStatus {
    Active(bool),
    Label(String),
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampaignStatus::Active(true) => write!(f, "active"),
            CampaignStatus::Active(false) => write!(f, "inactive"),
            CampaignStatus::Label(label) => write!(f, "{}", label),
        }
    }
}

/// Row of the campaign listing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: ItemId,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl CampaignSummary {
    #[cfg(test)]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            description: None,
            year: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Name with the status appended, as the campaign picker lists it
    pub fn label(&self) -> String {
        match &self.status {
            Some(status) => format!("{} ({})", self.name, status),
            None => self.name.clone(),
        }
    }
}

/// A full campaign with its selections
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::list")]
    pub employees: Vec<Employee>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub evaluators: Vec<Evaluator>,

    #[serde(default, deserialize_with = "lenient::list")]
    pub factors: Vec<Factor>,

    #[serde(
        default,
        deserialize_with = "EmployeeGroup::deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub group: Option<EmployeeGroup>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Numeric>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Campaign {
    #[cfg(test)]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            employees: Vec::new(),
            evaluators: Vec::new(),
            factors: Vec::new(),
            group: None,
            status: None,
            description: None,
            year: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// Body of a campaign create or update from the registry screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub year: i32,
    pub status: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_lists_are_lenient() {
        let json = r#"{
            "id": 1,
            "name": "Annual Review 2025",
            "employees": null,
            "evaluators": {"unexpected": true},
            "factors": [{"id": 3, "name": "Teamwork", "type": "qualitative"}],
            "group": "Staff",
            "status": "draft"
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert!(campaign.employees.is_empty());
        assert!(campaign.evaluators.is_empty());
        assert_eq!(campaign.factors.len(), 1);
        assert_eq!(campaign.group, Some(EmployeeGroup::Staff));
        assert_eq!(
            campaign.status,
            Some(CampaignStatus::Label("draft".to_string()))
        );
    }

    #[test]
    fn test_summary_label() {
        let mut summary: CampaignSummary =
            serde_json::from_str(r#"{"id": 4, "name": "Q1", "status": true}"#).unwrap();
        assert_eq!(summary.label(), "Q1 (active)");
        summary.status = None;
        assert_eq!(summary.label(), "Q1");
    }

    #[test]
    fn test_new_campaign_wire_shape() {
        let body = NewCampaign {
            name: "Mid-year".to_string(),
            description: "H1 check-in".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            year: 2025,
            status: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["startDate"], "2025-01-15");
        assert_eq!(value["endDate"], "2025-06-30");
        assert_eq!(value["year"], 2025);
    }
}
