//! CLI handler for the `wizard` subcommand
//!
//! Mounts a wizard session, replays an optional YAML script of steps against
//! it, prints the review screen and optionally saves.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::backend::PortalClient;
use crate::cli::{notifier, WizardArgs};
use crate::config::Config;
use crate::model::{EmployeeGroup, Evaluator, FactorType, ItemId, Numeric};
use crate::notify::{Notification, Notifier};
use crate::selection::{WizardAction, WizardState, WizardStep};
use crate::session::WizardSession;

#[derive(Debug, Deserialize)]
pub struct WizardScript {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    SelectCampaign(ItemId),
    Group(EmployeeGroup),
    AddEmployees(Vec<ItemId>),
    RemoveEmployee(ItemId),
    AddEvaluators(Vec<ItemId>),
    ExternalEvaluator(Evaluator),
    RemoveEvaluator(ItemId),
    SetLevel {
        id: ItemId,
        level: Numeric,
    },
    ViewFactors(FactorType),
    ToggleFactor {
        #[serde(rename = "type")]
        kind: FactorType,
        id: ItemId,
    },
    RemoveFactor {
        #[serde(rename = "type")]
        kind: FactorType,
        id: ItemId,
    },
    /// Confirm the factor picker: the bucket becomes exactly these factors
    SetFactors {
        #[serde(rename = "type")]
        kind: FactorType,
        ids: Vec<ItemId>,
    },
    Next,
    Previous,
    Jump(String),
    Reset,
}

impl WizardScript {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read wizard script: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse wizard script: {}", path.display()))
    }
}

pub async fn execute(args: WizardArgs, config: Config) -> anyhow::Result<()> {
    let notifier = notifier();
    let client = Arc::new(PortalClient::new(&config.backend)?);
    let group = args.group.unwrap_or(config.default_group);

    let mut session = WizardSession::new(client, notifier.clone(), group);
    session.mount().await;

    if let Some(term) = &args.find_evaluator {
        println!("Evaluators matching '{}':", term);
        for evaluator in session.catalogs().evaluators.iter().filter(|e| e.matches(term)) {
            println!("  [{}] {}", evaluator.id, evaluator.display_name());
        }
        println!();
    }

    match &args.script {
        Some(path) => {
            let script = WizardScript::load(path)?;
            info!("Replaying {} wizard steps from {:?}", script.steps.len(), path);
            for step in script.steps {
                apply(&mut session, notifier.as_ref(), step).await;
            }
        }
        None => print_campaigns(&session),
    }

    print_review(session.state());
    if args.payload {
        println!("{}", serde_json::to_string_pretty(&session.state().payload())?);
    }

    if args.save && !session.save().await {
        anyhow::bail!("Campaign was not saved");
    }
    Ok(())
}

async fn apply(session: &mut WizardSession, notifier: &dyn Notifier, step: ScriptStep) {
    match step {
        ScriptStep::SelectCampaign(id) => session.select_campaign(id).await,
        ScriptStep::Group(group) => session.change_group(group).await,
        ScriptStep::AddEmployees(ids) => {
            let (found, missing) = session.catalogs().pick_employees(&ids);
            report_missing(notifier, "employee", &missing);
            session.dispatch(WizardAction::ConfirmEmployees(found));
        }
        ScriptStep::RemoveEmployee(id) => {
            session.dispatch(WizardAction::RemoveEmployee(id));
        }
        ScriptStep::AddEvaluators(ids) => {
            let (found, missing) = session.catalogs().pick_evaluators(&ids);
            report_missing(notifier, "evaluator", &missing);
            session.dispatch(WizardAction::ConfirmEvaluators(found));
        }
        ScriptStep::ExternalEvaluator(evaluator) => {
            session.dispatch(WizardAction::AddExternalEvaluator(evaluator));
        }
        ScriptStep::RemoveEvaluator(id) => {
            session.dispatch(WizardAction::RemoveEvaluator(id));
        }
        ScriptStep::SetLevel { id, level } => {
            session.dispatch(WizardAction::SetEvaluatorLevel { id, level });
        }
        ScriptStep::ViewFactors(kind) => session.view_factor_type(kind).await,
        ScriptStep::ToggleFactor { kind, id } => {
            if !session.catalogs().factors.contains_key(&kind) {
                session.load_factor_catalog(kind).await;
            }
            match session.catalogs().find_factor(kind, &id).cloned() {
                Some(factor) => {
                    session.dispatch(WizardAction::ToggleFactor { kind, factor });
                }
                None => report_missing(notifier, &format!("{} factor", kind), &[id]),
            }
        }
        ScriptStep::RemoveFactor { kind, id } => {
            session.dispatch(WizardAction::RemoveFactor { kind, id });
        }
        ScriptStep::SetFactors { kind, ids } => {
            if !session.catalogs().factors.contains_key(&kind) {
                session.load_factor_catalog(kind).await;
            }
            let mut factors = Vec::new();
            for id in ids {
                match session.catalogs().find_factor(kind, &id) {
                    Some(factor) => factors.push(factor.clone()),
                    None => report_missing(notifier, &format!("{} factor", kind), &[id]),
                }
            }
            session.dispatch(WizardAction::ReplaceFactorBucket { kind, factors });
        }
        ScriptStep::Next => {
            session.dispatch(WizardAction::Next);
        }
        ScriptStep::Previous => {
            session.dispatch(WizardAction::Previous);
        }
        ScriptStep::Jump(step) => match step.parse::<WizardStep>() {
            Ok(step) => {
                session.dispatch(WizardAction::JumpTo(step));
            }
            Err(e) => notifier.notify(Notification::warning(e)),
        },
        ScriptStep::Reset => session.reset(),
    }
}

fn report_missing(notifier: &dyn Notifier, what: &str, missing: &[ItemId]) {
    for id in missing {
        notifier.notify(Notification::warning(format!("No {} with id {}", what, id)));
    }
}

fn print_campaigns(session: &WizardSession) {
    println!("Campaigns:");
    for campaign in &session.catalogs().campaigns {
        println!("  [{}] {}", campaign.id, campaign.label());
    }
    println!();
}

fn print_review(state: &WizardState) {
    let steps: Vec<_> = WizardStep::ALL
        .iter()
        .map(|step| {
            if *step == state.active_step {
                format!("[{}]", step.label())
            } else {
                step.label().to_string()
            }
        })
        .collect();
    println!("{}", steps.join(" > "));

    let campaign = state
        .campaign
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(new)".to_string());
    let counts = state.counts();
    println!("\nCampaign: {}  Group: {}", campaign, state.group);

    println!("\nEmployees ({}):", counts.employees);
    for employee in &state.selections.employees {
        println!("  [{}] {}", employee.id, employee.name);
    }

    println!("\nEvaluators ({}):", counts.evaluators);
    for evaluator in &state.selections.evaluators {
        let level = evaluator
            .level
            .as_ref()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {:<28} level {}",
            evaluator.id,
            evaluator.display_name(),
            level
        );
    }

    println!("\nFactors ({}):", counts.factors);
    for bucket in state.selections.factors.summary() {
        println!("  {:<13} {:>2}  {}", bucket.kind, bucket.count, bucket.names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_parses_every_step_shape() {
        let yaml = r#"
steps:
  - select_campaign: 1
  - group: officer
  - add_employees: [10, 11]
  - external_evaluator: {id: 99, name: "Dana Guest"}
  - set_level: {id: 99, level: "4"}
  - toggle_factor: {type: quantitative, id: 30}
  - set_factors: {type: recommended, ids: [40, 41]}
  - next
  - jump: review
"#;
        let script: WizardScript = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(script.steps.len(), 9);
        assert_eq!(script.steps[0], ScriptStep::SelectCampaign(ItemId::from(1)));
        assert_eq!(script.steps[1], ScriptStep::Group(EmployeeGroup::Officer));
        assert_eq!(
            script.steps[5],
            ScriptStep::ToggleFactor {
                kind: FactorType::Quantitative,
                id: ItemId::from(30)
            }
        );
        assert_eq!(
            script.steps[6],
            ScriptStep::SetFactors {
                kind: FactorType::Recommended,
                ids: vec![ItemId::from(40), ItemId::from(41)]
            }
        );
        assert_eq!(script.steps[7], ScriptStep::Next);
        assert_eq!(script.steps[8], ScriptStep::Jump("review".to_string()));
    }

    #[test]
    fn test_empty_script() {
        let script: WizardScript = serde_yaml::from_str("{}").unwrap();
        assert!(script.steps.is_empty());
    }
}
