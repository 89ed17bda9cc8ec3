//! CLI handler for the `campaigns` subcommand

use chrono::{Datelike, NaiveDate};

use crate::backend::{PortalBackend, PortalClient};
use crate::cli::{fail, notifier, print_page_footer, CampaignAction, CampaignsArgs};
use crate::config::Config;
use crate::model::CampaignSummary;
use crate::notify::{Notification, Notifier};
use crate::screens::campaigns::{filter, CampaignEdit, CampaignForm};
use crate::screens::paginate;

pub async fn execute(args: CampaignsArgs, config: Config) -> anyhow::Result<()> {
    let notifier = notifier();

    if let CampaignAction::Years = args.action {
        for year in config.campaign_years.years() {
            println!("{}", year);
        }
        return Ok(());
    }

    let client = PortalClient::new(&config.backend)?;

    match args.action {
        CampaignAction::List { search, page } => {
            let campaigns = client
                .list_campaigns()
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            let hits = filter(&campaigns, search.as_deref().unwrap_or(""));
            let page = paginate(&hits, page, config.paging.campaigns);

            if page.items.is_empty() {
                println!("No campaigns found.");
            }
            for campaign in page.items {
                print_row(campaign);
            }
            print_page_footer(&page);
        }
        CampaignAction::Create {
            name,
            description,
            from,
            to,
            year,
        } => {
            let year = year
                .or_else(|| NaiveDate::parse_from_str(&from, "%Y-%m-%d").ok().map(|d| d.year()))
                .unwrap_or_default();
            let form = CampaignForm {
                name,
                description,
                date_from: from,
                date_to: to,
                year,
            };
            let body = form
                .validate()
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
            let created = client
                .register_campaign(&body)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Campaign Created."));
            if let Some(created) = created {
                print_row(&created);
            }
        }
        CampaignAction::Update {
            id,
            name,
            description,
            from,
            to,
            year,
            active,
        } => {
            let campaigns = client
                .list_campaigns()
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            let existing = campaigns
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| fail(notifier.as_ref(), format!("No campaign with id {}", id)))?;

            let edit = CampaignEdit {
                name,
                description,
                date_from: from,
                date_to: to,
                year,
                active,
            };
            let body = edit
                .apply(existing)
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
            client
                .revise_campaign(&id, &body)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Campaign updated successfully!"));
        }
        CampaignAction::Delete { id } => {
            client
                .delete_campaign(&id)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Campaign deleted."));
        }
        CampaignAction::Years => {}
    }

    Ok(())
}

fn print_row(campaign: &CampaignSummary) {
    let dates = match (&campaign.start_date, &campaign.end_date) {
        (Some(from), Some(to)) => format!("{} .. {}", from, to),
        _ => "-".to_string(),
    };
    println!("  [{}] {:<30} {}", campaign.id, campaign.label(), dates);
}
