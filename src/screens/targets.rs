//! Target entry screen: type-ahead pickers and the create form

use super::listing::contains_ci;
use crate::error::ValidationError;
use crate::model::{CampaignSummary, Employee, ItemId, NewTarget};

/// Suggestions for a type-ahead box. An empty query shows nothing.
pub fn suggest<'a, T>(
    items: &'a [T],
    query: &str,
    name_of: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| contains_ci(name_of(*item), query))
        .collect()
}

pub fn suggest_employees<'a>(employees: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    suggest(employees, query, |e| e.name.as_str())
}

pub fn suggest_campaigns<'a>(
    campaigns: &'a [CampaignSummary],
    query: &str,
) -> Vec<&'a CampaignSummary> {
    suggest(campaigns, query, |c| c.name.as_str())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetForm {
    pub employee: Option<ItemId>,
    pub campaign: Option<ItemId>,
    pub target_name: String,
    pub description: String,
    pub achievement: String,
    pub total_marks: String,
    pub marks_obtained: String,
}

impl TargetForm {
    pub fn validate(&self) -> Result<NewTarget, ValidationError> {
        let employee_id = self
            .employee
            .clone()
            .ok_or_else(|| ValidationError::MissingField("Please select an employee.".to_string()))?;
        let evaluation_campaign_id = self
            .campaign
            .clone()
            .ok_or_else(|| ValidationError::MissingField("Please select a campaign.".to_string()))?;
        if self.target_name.trim().is_empty() {
            return Err(ValidationError::MissingField(
                "Target name is required.".to_string(),
            ));
        }

        Ok(NewTarget {
            employee_id,
            evaluation_campaign_id,
            target_name: self.target_name.trim().to_string(),
            description: self.description.trim().to_string(),
            achievement: self.achievement.trim().to_string(),
            total_marks: whole_marks("Total marks", &self.total_marks)?,
            marks_obtained: whole_marks("Marks obtained", &self.marks_obtained)?,
        })
    }
}

/// Blank marks are sent as null
fn whole_marks(field: &str, raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ValidationError::NotAnInteger(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions() {
        let employees = vec![Employee::new(10, "Asha Perera"), Employee::new(11, "Chen Wei")];
        assert!(suggest_employees(&employees, "").is_empty());
        assert_eq!(suggest_employees(&employees, "per")[0].id, ItemId::from(10));

        let campaigns = vec![CampaignSummary::new(1, "Annual Review 2025")];
        assert_eq!(suggest_campaigns(&campaigns, "annual").len(), 1);
        assert!(suggest_campaigns(&campaigns, "mid").is_empty());
    }

    #[test]
    fn test_form_to_body() {
        let form = TargetForm {
            employee: Some(ItemId::from(10)),
            campaign: Some(ItemId::from(1)),
            target_name: "Close 40 tickets".to_string(),
            total_marks: "50".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();
        assert_eq!(body["employeeId"], 10);
        assert_eq!(body["evaluationCampaignId"], 1);
        assert_eq!(body["totalMarks"], 50);
        assert!(body["marksObtained"].is_null());
    }

    #[test]
    fn test_form_rules() {
        let no_employee = TargetForm {
            campaign: Some(ItemId::from(1)),
            target_name: "x".to_string(),
            ..Default::default()
        };
        assert_eq!(
            no_employee.validate().unwrap_err().to_string(),
            "Please select an employee."
        );

        let fractional = TargetForm {
            employee: Some(ItemId::from(10)),
            campaign: Some(ItemId::from(1)),
            target_name: "x".to_string(),
            marks_obtained: "7.5".to_string(),
            ..Default::default()
        };
        assert_eq!(
            fractional.validate(),
            Err(ValidationError::NotAnInteger("Marks obtained".to_string()))
        );
    }
}
