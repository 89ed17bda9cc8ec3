//! Save payload for campaign create/update

use serde::Serialize;

use super::Selections;
use crate::model::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdRef {
    pub id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluatorRef {
    pub id: ItemId,
    pub level: i64,
}

/// Body sent to the campaign create/update endpoints.
/// `id` is omitted for a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub employees: Vec<IdRef>,
    pub evaluators: Vec<EvaluatorRef>,
    pub factors: Vec<IdRef>,
}

impl SavePayload {
    pub fn build(campaign: Option<&ItemId>, selections: &Selections) -> Self {
        let employees = selections
            .employees
            .iter()
            .map(|e| IdRef { id: e.id.clone() })
            .collect();

        let evaluators = selections
            .evaluators
            .iter()
            .map(|e| EvaluatorRef {
                id: e.id.clone(),
                level: e.level.as_ref().and_then(|l| l.as_i64()).unwrap_or(0),
            })
            .collect();

        let factors = selections
            .factors
            .flatten()
            .map(|f| IdRef { id: f.id.clone() })
            .collect();

        Self {
            id: campaign.cloned(),
            employees,
            evaluators,
            factors,
        }
    }
}
