//! CLI handler for the `targets` subcommand

use crate::backend::{PortalBackend, PortalClient};
use crate::cli::{fail, notifier, print_page_footer, TargetAction, TargetsArgs};
use crate::config::Config;
use crate::notify::{Notification, Notifier};
use crate::screens::paginate;
use crate::screens::targets::{suggest_campaigns, suggest_employees, TargetForm};

pub async fn execute(args: TargetsArgs, config: Config) -> anyhow::Result<()> {
    let notifier = notifier();
    let client = PortalClient::new(&config.backend)?;

    match args.action {
        TargetAction::List { page } => {
            let targets = client
                .list_targets()
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            let page = paginate(&targets, page, config.paging.targets);

            if page.items.is_empty() {
                println!("No targets recorded.");
            }
            for target in page.items {
                let marks = match (&target.marks_obtained, &target.total_marks) {
                    (Some(got), Some(total)) => format!("{}/{}", got, total),
                    (None, Some(total)) => format!("-/{}", total),
                    _ => "-".to_string(),
                };
                let employee = target
                    .employee_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!("  {:<32} employee {:<6} {}", target.target_name, employee, marks);
            }
            print_page_footer(&page);
        }
        TargetAction::Suggest { query, group } => {
            let group = group.unwrap_or(config.default_group);
            let (employees, campaigns) =
                futures::join!(client.list_employees(group), client.list_campaigns());
            let employees = employees.map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            let campaigns = campaigns.map_err(|e| fail(notifier.as_ref(), e.user_message()))?;

            println!("Employees:");
            for employee in suggest_employees(&employees, &query) {
                println!("  [{}] {}", employee.id, employee.name);
            }
            println!("Campaigns:");
            for campaign in suggest_campaigns(&campaigns, &query) {
                println!("  [{}] {}", campaign.id, campaign.label());
            }
        }
        TargetAction::Create {
            employee,
            campaign,
            name,
            description,
            achievement,
            total_marks,
            marks_obtained,
        } => {
            let form = TargetForm {
                employee,
                campaign,
                target_name: name,
                description,
                achievement,
                total_marks,
                marks_obtained,
            };
            let body = form
                .validate()
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
            client
                .create_target(&body)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Target created successfully!"));
        }
    }

    Ok(())
}
