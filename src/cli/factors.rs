//! CLI handler for the `factors` subcommand

use crate::backend::{PortalBackend, PortalClient};
use crate::cli::{
    fail, notifier, print_page_footer, FactorAction, FactorFields, FactorPatch, FactorsArgs,
};
use crate::config::Config;
use crate::model::Factor;
use crate::notify::{Notification, Notifier};
use crate::screens::factors::{FactorCatalog, FactorDraft, FactorFilter, GroupFilter};
use crate::screens::paginate;

impl From<FactorFields> for FactorDraft {
    fn from(fields: FactorFields) -> Self {
        Self {
            kind: fields.kind,
            group: fields.group,
            name: fields.name,
            description: fields.description,
            marks_level: fields.marks_level,
            total_marks: fields.total_marks,
            passing_marks: fields.passing_marks,
        }
    }
}

impl FactorPatch {
    /// Overlay the given fields on a draft pre-filled from the stored factor
    fn apply_to(self, draft: &mut FactorDraft) {
        if let Some(kind) = self.kind {
            draft.kind = kind;
        }
        if let Some(group) = self.group {
            draft.group = group;
        }
        let fields = [
            (self.name, &mut draft.name),
            (self.description, &mut draft.description),
            (self.marks_level, &mut draft.marks_level),
            (self.total_marks, &mut draft.total_marks),
            (self.passing_marks, &mut draft.passing_marks),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

pub async fn execute(args: FactorsArgs, config: Config) -> anyhow::Result<()> {
    let notifier = notifier();
    let client = PortalClient::new(&config.backend)?;

    match args.action {
        FactorAction::List {
            kind,
            group,
            search,
            page,
        } => {
            let group = group
                .map(|g| g.parse::<GroupFilter>())
                .transpose()
                .map_err(|e| fail(notifier.as_ref(), e))?;
            let filter = FactorFilter {
                kind,
                group,
                search: search.unwrap_or_default(),
            };

            let catalog = FactorCatalog::new(
                client
                    .list_factors(None)
                    .await
                    .map_err(|e| fail(notifier.as_ref(), e.user_message()))?,
            );
            let hits = catalog.filtered(&filter);
            let page = paginate(&hits, page, config.paging.factors);

            if page.items.is_empty() {
                println!("No factors found.");
            }
            for factor in page.items {
                print_row(factor);
            }
            print_page_footer(&page);
        }
        FactorAction::Create(fields) => {
            let body = FactorDraft::from(fields)
                .validate(None)
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;

            let mut catalog = FactorCatalog::new(
                client
                    .list_factors(None)
                    .await
                    .map_err(|e| fail(notifier.as_ref(), e.user_message()))?,
            );
            let temp_id = catalog.begin_create(&body);
            let outcome = client.create_factor(&body).await;
            if !catalog.complete_create(&temp_id, &outcome) {
                let message = match outcome {
                    Err(e) => e.user_message(),
                    Ok(_) => "Create failed".to_string(),
                };
                return Err(fail(notifier.as_ref(), message));
            }

            notifier.notify(Notification::success("Factor created successfully"));
            if let Some(created) = catalog.factors().last() {
                print_row(created);
            }
        }
        FactorAction::Update { id, patch } => {
            let factors = client
                .list_factors(None)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            let existing = factors
                .iter()
                .find(|f| f.id == id)
                .ok_or_else(|| fail(notifier.as_ref(), format!("No factor with id {}", id)))?;

            let mut draft = FactorDraft::from_factor(existing);
            patch.apply_to(&mut draft);
            let body = draft
                .validate(Some(id.clone()))
                .map_err(|e| fail(notifier.as_ref(), e.to_string()))?;
            client
                .update_factor(&id, &body)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Factor updated successfully"));
        }
        FactorAction::Delete { id } => {
            client
                .delete_factor(&id)
                .await
                .map_err(|e| fail(notifier.as_ref(), e.user_message()))?;
            notifier.notify(Notification::success("Factor deleted successfully"));
        }
    }

    Ok(())
}

fn print_row(factor: &Factor) {
    let kind = factor.kind.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string());
    println!(
        "  [{}] {:<28} {:<13} {:<8} {}",
        factor.id,
        factor.name,
        kind,
        factor.group(),
        factor.description.as_deref().unwrap_or("")
    );
}
