//! Campaign registry screen: create form, listing and edit dialog

use chrono::{Datelike, NaiveDate};

use super::listing::contains_ci;
use crate::error::ValidationError;
use crate::model::{CampaignStatus, CampaignSummary, NewCampaign};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    pub date_from: String,
    pub date_to: String,
    pub year: i32,
}

impl CampaignForm {
    /// Check the form and build the create body. New campaigns start active.
    pub fn validate(&self) -> Result<NewCampaign, ValidationError> {
        if [&self.name, &self.description, &self.date_from, &self.date_to]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingField(
                "Please fill all fields.".to_string(),
            ));
        }

        let (from, to) = match (parse_date(&self.date_from), parse_date(&self.date_to)) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(ValidationError::InvalidDate),
        };
        check_dates(from, to, self.year)?;

        Ok(NewCampaign {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: from,
            end_date: to,
            year: self.year,
            status: true,
        })
    }
}

/// Edits from the campaign dialog; blank fields keep the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignEdit {
    pub name: String,
    pub description: String,
    pub date_from: String,
    pub date_to: String,
    pub year: Option<i32>,
    pub active: Option<bool>,
}

impl CampaignEdit {
    pub fn apply(&self, existing: &CampaignSummary) -> Result<NewCampaign, ValidationError> {
        let pick = |edit: &str, stored: Option<&str>| -> String {
            if edit.trim().is_empty() {
                stored.unwrap_or_default().to_string()
            } else {
                edit.trim().to_string()
            }
        };

        let name = pick(&self.name, Some(existing.name.as_str()));
        let description = pick(&self.description, existing.description.as_deref());
        let from = pick(&self.date_from, existing.start_date.as_deref());
        let to = pick(&self.date_to, existing.end_date.as_deref());

        let (from, to) = match (parse_date(&from), parse_date(&to)) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(ValidationError::InvalidDate),
        };
        let year = self
            .year
            .or_else(|| existing.year.as_ref().and_then(|y| y.as_i64()).map(|y| y as i32))
            .unwrap_or_else(|| from.year());
        check_dates(from, to, year)?;

        let status = self.active.unwrap_or(match &existing.status {
            Some(CampaignStatus::Active(active)) => *active,
            Some(CampaignStatus::Label(label)) => !label.eq_ignore_ascii_case("inactive"),
            None => true,
        });

        Ok(NewCampaign {
            name,
            description,
            start_date: from,
            end_date: to,
            year,
            status,
        })
    }
}

/// Calendar date, ignoring any time of day the backend appends
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw
        .split_once(|c: char| c == 'T' || c == ' ')
        .map_or(raw, |(day, _)| day);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

fn check_dates(from: NaiveDate, to: NaiveDate, year: i32) -> Result<(), ValidationError> {
    if from.year() != year {
        return Err(ValidationError::FromDateYear(year));
    }
    if to < from {
        return Err(ValidationError::DateOrder);
    }
    Ok(())
}

/// Campaigns whose name contains `term`, case-insensitively
pub fn filter<'a>(campaigns: &'a [CampaignSummary], term: &str) -> Vec<&'a CampaignSummary> {
    campaigns
        .iter()
        .filter(|c| contains_ci(&c.name, term))
        .collect()
}
