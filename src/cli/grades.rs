//! CLI handler for the `grades` subcommand

use crate::backend::PortalClient;
use crate::cli::{fail, notifier, GradeAction, GradeFields, GradesArgs};
use crate::config::Config;
use crate::model::ItemId;
use crate::notify::{Notification, Notifier};
use crate::screens::grades::{merge_edit, sort_by_label, GradeForm};

fn form(grade: String, fields: GradeFields) -> GradeForm {
    GradeForm {
        grade,
        expression: fields.expression,
        start_marks: fields.start,
        end_marks: fields.end,
        remarks: fields.remarks,
    }
}

pub async fn execute(args: GradesArgs, config: Config) -> anyhow::Result<()> {
    let notifier = notifier();
    let client = PortalClient::new(&config.backend)?;

    match args.action {
        GradeAction::List => {
            let mut grades = client
                .list_grades()
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            sort_by_label(&mut grades);

            if grades.is_empty() {
                println!("No grades defined.");
            }
            for grade in &grades {
                let marks = |m: &Option<crate::model::Numeric>| {
                    m.as_ref().map(|m| m.to_string()).unwrap_or_else(|| "?".to_string())
                };
                println!(
                    "  {:<4} {:<20} {:>5} - {:<5} {}",
                    grade.grade,
                    grade.expression,
                    marks(&grade.start_marks),
                    marks(&grade.end_marks),
                    grade.remarks.as_deref().unwrap_or("")
                );
            }
        }
        GradeAction::Create { grade, fields } => {
            let body = form(grade, fields)
                .validate()
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
            client
                .create_grade(&body)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Grade created successfully."));
        }
        GradeAction::Update {
            grade,
            rename,
            fields,
        } => {
            let grades = client
                .list_grades()
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            let selected = grades
                .iter()
                .find(|g| g.grade == grade)
                .ok_or_else(|| fail(notifier.as_ref(), format!("No grade labelled '{}'", grade)))?;
            // grades listed without an id are addressed by label
            let id = selected
                .id
                .clone()
                .unwrap_or_else(|| ItemId::Text(selected.grade.clone()));

            let update = merge_edit(selected, id, &form(rename, fields))
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
            client
                .update_grade(&update)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Grade updated successfully!"));
        }
        GradeAction::Delete { grade } => {
            client
                .delete_grade(&grade)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success(format!(
                "Grade \"{}\" deleted successfully.",
                grade
            )));
        }
    }

    Ok(())
}
