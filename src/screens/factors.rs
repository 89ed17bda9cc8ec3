//! Factor catalog screen: draft validation, filtering and optimistic create

use std::fmt;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use super::listing::contains_ci;
use crate::error::{BackendError, ValidationError};
use crate::model::{EmployeeGroup, Factor, FactorBody, FactorType, ItemId};

/// Unsaved factor as typed into the create or edit form
#[derive(Debug, Clone, PartialEq)]
pub struct FactorDraft {
    pub kind: FactorType,
    pub group: EmployeeGroup,
    pub name: String,
    pub description: String,
    pub marks_level: String,
    pub total_marks: String,
    pub passing_marks: String,
}

impl Default for FactorDraft {
    fn default() -> Self {
        Self {
            kind: FactorType::Qualitative,
            group: EmployeeGroup::Officer,
            name: String::new(),
            description: String::new(),
            marks_level: String::new(),
            total_marks: String::new(),
            passing_marks: String::new(),
        }
    }
}

impl FactorDraft {
    /// Marks fields only travel for the type that uses them
    pub fn validate(&self, id: Option<ItemId>) -> Result<FactorBody, ValidationError> {
        let required = |value: &str, message: &str| {
            if value.trim().is_empty() {
                Err(ValidationError::MissingField(message.to_string()))
            } else {
                Ok(value.trim().to_string())
            }
        };

        let name = required(&self.name, "Factor Name is required")?;
        let description = required(&self.description, "Description is required")?;

        let mut body = FactorBody {
            id,
            factor_type: self.kind,
            evaluation_group: self.group,
            name,
            description,
            marks_level: None,
            total_marks: None,
            passing_marks: None,
        };

        match self.kind {
            FactorType::Qualitative => {
                body.marks_level = Some(required(
                    &self.marks_level,
                    "Marks Level is required for Qualitative",
                )?);
            }
            FactorType::Quantitative => {
                let message = "Total Marks and Passing Marks are required for Quantitative";
                body.total_marks = Some(required(&self.total_marks, message)?);
                body.passing_marks = Some(required(&self.passing_marks, message)?);
            }
            FactorType::Recommended => {}
        }

        Ok(body)
    }

    /// Pre-fill the edit form from a catalog entry
    pub fn from_factor(factor: &Factor) -> Self {
        let text = |value: &Option<crate::model::Numeric>| {
            value.as_ref().map(|v| v.to_string()).unwrap_or_default()
        };
        Self {
            kind: factor.kind.unwrap_or(FactorType::Qualitative),
            group: factor.group(),
            name: factor.name.clone(),
            description: factor.description.clone().unwrap_or_default(),
            marks_level: text(&factor.marks_level),
            total_marks: text(&factor.total_marks),
            passing_marks: text(&factor.passing_marks),
        }
    }
}

/// Group column filter. Untagged factors count as officer factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupFilter {
    All,
    Only(EmployeeGroup),
}

impl GroupFilter {
    fn admits(&self, group: EmployeeGroup) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(wanted) => group == *wanted,
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupFilter::All => write!(f, "All"),
            GroupFilter::Only(group) => write!(f, "{}", group),
        }
    }
}

impl FromStr for GroupFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(GroupFilter::All);
        }
        s.parse().map(GroupFilter::Only)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorFilter {
    pub kind: Option<FactorType>,
    pub group: Option<GroupFilter>,
    pub search: String,
}

impl FactorFilter {
    pub fn matches(&self, factor: &Factor) -> bool {
        if self.kind.is_some() && factor.kind != self.kind {
            return false;
        }
        if let Some(group) = &self.group {
            if !group.admits(factor.group()) {
                return false;
            }
        }
        let search = self.search.trim();
        search.is_empty()
            || contains_ci(&factor.name, search)
            || factor
                .description
                .as_deref()
                .is_some_and(|d| contains_ci(d, search))
    }
}

/// Locally held catalog with optimistic inserts
#[derive(Debug, Default)]
pub struct FactorCatalog {
    factors: Vec<Factor>,
}

impl FactorCatalog {
    pub fn new(factors: Vec<Factor>) -> Self {
        Self { factors }
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn filtered(&self, filter: &FactorFilter) -> Vec<&Factor> {
        self.factors.iter().filter(|f| filter.matches(f)).collect()
    }

    /// Show the new factor immediately under a temporary id
    pub fn begin_create(&mut self, body: &FactorBody) -> ItemId {
        let temp_id = ItemId::Text(format!("pending-{}", Uuid::new_v4()));
        self.factors.push(body.to_factor(temp_id.clone()));
        temp_id
    }

    /// Settle an optimistic insert. The entry stays on success, taking the
    /// server's id when one came back, and is removed on failure.
    pub fn complete_create(
        &mut self,
        temp_id: &ItemId,
        outcome: &Result<Option<Factor>, BackendError>,
    ) -> bool {
        match outcome {
            Ok(saved) => {
                if let Some(saved) = saved {
                    if let Some(entry) = self.factors.iter_mut().find(|f| &f.id == temp_id) {
                        entry.id = saved.id.clone();
                    }
                }
                true
            }
            Err(e) => {
                debug!("Rolling back optimistic factor {}: {}", temp_id, e);
                self.factors.retain(|f| &f.id != temp_id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: FactorType) -> FactorDraft {
        FactorDraft {
            kind,
            name: "Punctuality".to_string(),
            description: "Arrives on time".to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> FactorCatalog {
        let mut teamwork = Factor::new(1, "Teamwork").of_kind(FactorType::Qualitative);
        teamwork.evaluation_group = Some(EmployeeGroup::Staff);
        teamwork.description = Some("Works well with peers".to_string());
        let mut sales = Factor::new(2, "Sales volume").of_kind(FactorType::Quantitative);
        sales.evaluation_group = Some(EmployeeGroup::Officer);
        let untagged = Factor::new(3, "Initiative").of_kind(FactorType::Qualitative);
        FactorCatalog::new(vec![teamwork, sales, untagged])
    }

    #[test]
    fn test_type_specific_requirements() {
        let missing_level = draft(FactorType::Qualitative).validate(None).unwrap_err();
        assert_eq!(missing_level.to_string(), "Marks Level is required for Qualitative");

        let mut quantitative = draft(FactorType::Quantitative);
        quantitative.total_marks = "100".to_string();
        assert!(quantitative.validate(None).is_err());
        quantitative.passing_marks = "40".to_string();
        let body = quantitative.validate(None).unwrap();
        assert_eq!(body.marks_level, None);
        assert_eq!(body.passing_marks.as_deref(), Some("40"));

        assert!(draft(FactorType::Recommended).validate(None).is_ok());
    }

    #[test]
    fn test_name_checked_before_description() {
        let blank = FactorDraft::default();
        assert_eq!(
            blank.validate(None).unwrap_err().to_string(),
            "Factor Name is required"
        );
    }

    #[test]
    fn test_filters() {
        let catalog = catalog();
        let by_type = FactorFilter {
            kind: Some(FactorType::Quantitative),
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&by_type).len(), 1);

        let all_groups = FactorFilter {
            group: Some(GroupFilter::All),
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&all_groups).len(), 3);

        let staff: GroupFilter = "staff".parse().unwrap();
        let by_group = FactorFilter {
            group: Some(staff),
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&by_group).len(), 1);
        assert_eq!(catalog.filtered(&by_group)[0].name, "Teamwork");

        let by_description = FactorFilter {
            search: "PEERS".to_string(),
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&by_description).len(), 1);
    }

    #[test]
    fn test_untagged_factor_is_listed_with_officers() {
        let json = r#"[{"id": 1, "factorName": "Initiative", "factorType": "Qualitative"}]"#;
        let catalog = FactorCatalog::new(serde_json::from_str(json).unwrap());

        let all = FactorFilter {
            group: Some(GroupFilter::All),
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&all).len(), 1);

        let officer = FactorFilter {
            group: Some(GroupFilter::Only(EmployeeGroup::Officer)),
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&officer).len(), 1);

        let staff = FactorFilter {
            group: Some(GroupFilter::Only(EmployeeGroup::Staff)),
            ..Default::default()
        };
        assert!(catalog.filtered(&staff).is_empty());
    }

    #[test]
    fn test_draft_prefills_from_catalog_entry() {
        let json = r#"{"id": 5, "factorName": "Punctuality", "factorType": "Quantitative",
                       "totalMarks": 100, "passingMarks": "40"}"#;
        let factor: Factor = serde_json::from_str(json).unwrap();
        let draft = FactorDraft::from_factor(&factor);
        assert_eq!(draft.kind, FactorType::Quantitative);
        assert_eq!(draft.group, EmployeeGroup::Officer);
        assert_eq!(draft.total_marks, "100");
        assert_eq!(draft.passing_marks, "40");
        assert!(draft.marks_level.is_empty());
    }

    #[test]
    fn test_optimistic_create_adopts_server_id() {
        let mut catalog = catalog();
        let mut quantitative = draft(FactorType::Quantitative);
        quantitative.total_marks = "100".to_string();
        quantitative.passing_marks = "40".to_string();
        let body = quantitative.validate(None).unwrap();

        let temp = catalog.begin_create(&body);
        assert_eq!(catalog.factors().len(), 4);

        let saved = Ok(Some(Factor::new(44, "Punctuality")));
        assert!(catalog.complete_create(&temp, &saved));
        assert_eq!(catalog.factors()[3].id, ItemId::from(44));
    }

    #[test]
    fn test_optimistic_create_rolls_back() {
        let mut catalog = catalog();
        let mut qualitative = draft(FactorType::Qualitative);
        qualitative.marks_level = "5".to_string();
        let temp = catalog.begin_create(&qualitative.validate(None).unwrap());

        let failed = Err(BackendError::Status {
            status: 409,
            message: "Factor already exists".to_string(),
        });
        assert!(!catalog.complete_create(&temp, &failed));
        assert_eq!(catalog.factors().len(), 3);
        assert!(catalog.factors().iter().all(|f| f.id != temp));
    }
}
