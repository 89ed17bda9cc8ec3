//! Grade scale screen

use crate::error::ValidationError;
use crate::model::{Grade, GradeUpdate, ItemId, NewGrade};

const MARKS_MIN: u32 = 0;
const MARKS_MAX: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeForm {
    pub grade: String,
    pub expression: String,
    pub start_marks: String,
    pub end_marks: String,
    pub remarks: String,
}

impl GradeForm {
    pub fn validate(&self) -> Result<NewGrade, ValidationError> {
        if [&self.grade, &self.expression, &self.start_marks, &self.end_marks]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingField(
                "Please fill all required fields.".to_string(),
            ));
        }

        let start = parse_marks("Start marks", &self.start_marks)?;
        let end = parse_marks("End marks", &self.end_marks)?;
        if start > end {
            return Err(ValidationError::MarksOrder);
        }

        Ok(NewGrade {
            grade: self.grade.trim().to_string(),
            expression: self.expression.trim().to_string(),
            start_marks: start,
            end_marks: end,
            remarks: self.remarks.trim().to_string(),
            status: true,
        })
    }
}

/// Overlay non-blank edits onto the selected grade
pub fn merge_edit(
    selected: &Grade,
    id: ItemId,
    edit: &GradeForm,
) -> Result<GradeUpdate, ValidationError> {
    let keep = |edit: &str, stored: &str| {
        if edit.trim().is_empty() {
            stored.to_string()
        } else {
            edit.trim().to_string()
        }
    };
    let marks = |field: &str, edit: &str, stored: Option<f64>| {
        if edit.trim().is_empty() {
            Ok(stored)
        } else {
            parse_marks(field, edit).map(Some)
        }
    };

    let start_marks = marks(
        "Start marks",
        &edit.start_marks,
        selected.start_marks.as_ref().and_then(|m| m.as_f64()),
    )?;
    let end_marks = marks(
        "End marks",
        &edit.end_marks,
        selected.end_marks.as_ref().and_then(|m| m.as_f64()),
    )?;
    if let (Some(start), Some(end)) = (start_marks, end_marks) {
        if start > end {
            return Err(ValidationError::MarksOrder);
        }
    }

    let remarks = if edit.remarks.trim().is_empty() {
        selected.remarks.clone()
    } else {
        Some(edit.remarks.trim().to_string())
    };

    Ok(GradeUpdate {
        id,
        grade: keep(&edit.grade, &selected.grade),
        expression: keep(&edit.expression, &selected.expression),
        start_marks,
        end_marks,
        remarks,
    })
}

/// Order the listing by grade label
pub fn sort_by_label(grades: &mut [Grade]) {
    grades.sort_by(|a, b| a.grade.cmp(&b.grade));
}

fn parse_marks(field: &str, raw: &str) -> Result<f64, ValidationError> {
    let out_of_range = || ValidationError::MarksRange {
        field: field.to_string(),
        min: MARKS_MIN,
        max: MARKS_MAX,
    };
    let value: f64 = raw.trim().parse().map_err(|_| out_of_range())?;
    if !(f64::from(MARKS_MIN)..=f64::from(MARKS_MAX)).contains(&value) {
        return Err(out_of_range());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Numeric;

    fn form() -> GradeForm {
        GradeForm {
            grade: "A".to_string(),
            expression: "Excellent".to_string(),
            start_marks: "8.5".to_string(),
            end_marks: "10".to_string(),
            remarks: String::new(),
        }
    }

    #[test]
    fn test_valid_form() {
        let grade = form().validate().unwrap();
        assert_eq!(grade.start_marks, 8.5);
        assert!(grade.status);
    }

    #[test]
    fn test_marks_rules() {
        let mut missing = form();
        missing.expression.clear();
        assert!(matches!(
            missing.validate(),
            Err(ValidationError::MissingField(_))
        ));

        let mut too_high = form();
        too_high.end_marks = "11".to_string();
        assert_eq!(
            too_high.validate().unwrap_err().to_string(),
            "End marks must be a number between 0 and 10."
        );

        let mut text = form();
        text.start_marks = "high".to_string();
        assert!(text.validate().is_err());

        let mut reversed = form();
        reversed.start_marks = "9".to_string();
        reversed.end_marks = "3".to_string();
        assert_eq!(reversed.validate(), Err(ValidationError::MarksOrder));
    }

    #[test]
    fn test_merge_edit_keeps_blank_fields() {
        let selected = Grade {
            id: Some(ItemId::from(3)),
            grade: "B".to_string(),
            expression: "Good".to_string(),
            start_marks: Some(Numeric::Int(6)),
            end_marks: Some(Numeric::Float(7.9)),
            remarks: Some("Meets expectations".to_string()),
            status: Some(true),
        };
        let edit = GradeForm {
            expression: "Very good".to_string(),
            ..Default::default()
        };

        let update = merge_edit(&selected, ItemId::from(3), &edit).unwrap();
        assert_eq!(update.grade, "B");
        assert_eq!(update.expression, "Very good");
        assert_eq!(update.start_marks, Some(6.0));
        assert_eq!(update.end_marks, Some(7.9));
        assert_eq!(update.remarks.as_deref(), Some("Meets expectations"));
    }

    #[test]
    fn test_sort_by_label() {
        let mut grades: Vec<Grade> = ["C", "A", "B"]
            .iter()
            .map(|label| Grade {
                id: None,
                grade: label.to_string(),
                expression: String::new(),
                start_marks: None,
                end_marks: None,
                remarks: None,
                status: None,
            })
            .collect();
        sort_by_label(&mut grades);
        let labels: Vec<_> = grades.iter().map(|g| g.grade.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
    }
}
