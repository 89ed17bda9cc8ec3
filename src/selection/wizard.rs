//! Wizard state and its reducer.
//!
//! Every transition is `reduce(&state, action) -> Transition`: the input state
//! is never touched, a rejected action returns an identical state plus the
//! notice explaining why.

use std::fmt;
use std::str::FromStr;

use super::merge::merge_by_id;
use super::payload::SavePayload;
use super::registry::FactorRegistry;
use super::{SelectionCounts, Selections};
use crate::error::ValidationError;
use crate::model::{Campaign, Employee, EmployeeGroup, Evaluator, Factor, FactorType, ItemId, Numeric};
use crate::notify::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Campaign,
    Employees,
    Evaluators,
    Factors,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Campaign,
        WizardStep::Employees,
        WizardStep::Evaluators,
        WizardStep::Factors,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(WizardStep::Review)
    }

    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(WizardStep::Campaign)
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Campaign => "Campaign Info",
            WizardStep::Employees => "Employees",
            WizardStep::Evaluators => "Evaluators",
            WizardStep::Factors => "Factors",
            WizardStep::Review => "Review & Confirm",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(index) = s.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| format!("No wizard step {}", index));
        }
        match s.as_str() {
            "campaign" => Ok(WizardStep::Campaign),
            "employees" => Ok(WizardStep::Employees),
            "evaluators" => Ok(WizardStep::Evaluators),
            "factors" => Ok(WizardStep::Factors),
            "review" => Ok(WizardStep::Review),
            _ => Err(format!("Unknown wizard step: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub active_step: WizardStep,
    /// Furthest step reached; direct jumps cannot go past it
    pub furthest_step: WizardStep,
    pub campaign: Option<ItemId>,
    pub group: EmployeeGroup,
    /// Factor catalog currently shown in the factor picker
    pub factor_view: FactorType,
    pub selections: Selections,
}

impl WizardState {
    pub fn new(group: EmployeeGroup) -> Self {
        Self {
            active_step: WizardStep::Campaign,
            furthest_step: WizardStep::Campaign,
            campaign: None,
            group,
            factor_view: FactorType::Qualitative,
            selections: Selections::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.campaign.is_some()
    }

    pub fn counts(&self) -> SelectionCounts {
        self.selections.counts()
    }

    pub fn payload(&self) -> SavePayload {
        SavePayload::build(self.campaign.as_ref(), &self.selections)
    }

    fn go_to(&mut self, step: WizardStep) {
        self.active_step = step;
        if step > self.furthest_step {
            self.furthest_step = step;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    SelectCampaign(Option<ItemId>),
    /// Replace all selections with a campaign fetched from the backend
    LoadCampaign(Campaign),
    ChangeGroup(EmployeeGroup),
    ConfirmEmployees(Vec<Employee>),
    RemoveEmployee(ItemId),
    ConfirmEvaluators(Vec<Evaluator>),
    AddExternalEvaluator(Evaluator),
    RemoveEvaluator(ItemId),
    SetEvaluatorLevel { id: ItemId, level: Numeric },
    ViewFactorType(FactorType),
    ToggleFactor { kind: FactorType, factor: Factor },
    RemoveFactor { kind: FactorType, id: ItemId },
    ReplaceFactorBucket { kind: FactorType, factors: Vec<Factor> },
    Next,
    Previous,
    JumpTo(WizardStep),
    Reset,
}

impl WizardAction {
    /// Actions that edit campaign membership need a campaign chosen first
    fn needs_campaign(&self) -> bool {
        matches!(
            self,
            WizardAction::ConfirmEmployees(_)
                | WizardAction::RemoveEmployee(_)
                | WizardAction::ConfirmEvaluators(_)
                | WizardAction::AddExternalEvaluator(_)
                | WizardAction::RemoveEvaluator(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WizardState,
    pub notices: Vec<Notification>,
}

impl Transition {
    fn accepted(state: WizardState) -> Self {
        Self {
            state,
            notices: Vec::new(),
        }
    }

    fn rejected(state: &WizardState, reason: ValidationError) -> Self {
        Self {
            state: state.clone(),
            notices: vec![Notification::warning(reason.to_string())],
        }
    }
}

pub fn reduce(state: &WizardState, action: WizardAction) -> Transition {
    if action.needs_campaign() && state.campaign.is_none() {
        return Transition::rejected(state, ValidationError::NoCampaignSelected);
    }

    let mut next = state.clone();
    match action {
        WizardAction::SelectCampaign(id) => {
            next.campaign = id;
        }
        WizardAction::LoadCampaign(campaign) => {
            next.campaign = campaign.id.or(next.campaign);
            if let Some(group) = campaign.group {
                next.group = group;
            }
            next.selections = Selections {
                employees: dedupe(campaign.employees),
                evaluators: dedupe(campaign.evaluators),
                factors: FactorRegistry::from_factors(campaign.factors),
            };
            next.active_step = WizardStep::Campaign;
            next.furthest_step = WizardStep::Campaign;
        }
        WizardAction::ChangeGroup(group) => {
            next.group = group;
        }
        WizardAction::ConfirmEmployees(picked) => {
            next.selections.employees = merge_by_id(&state.selections.employees, picked);
        }
        WizardAction::RemoveEmployee(id) => {
            next.selections.employees.retain(|e| e.id != id);
        }
        WizardAction::ConfirmEvaluators(picked) => {
            next.selections.evaluators = merge_by_id(&state.selections.evaluators, picked);
        }
        WizardAction::AddExternalEvaluator(evaluator) => {
            next.selections.evaluators =
                merge_by_id(&state.selections.evaluators, vec![evaluator]);
        }
        WizardAction::RemoveEvaluator(id) => {
            next.selections.evaluators.retain(|e| e.id != id);
        }
        WizardAction::SetEvaluatorLevel { id, level } => {
            let Some(level) = whole_level(&level) else {
                return Transition::rejected(state, ValidationError::Level);
            };
            if let Some(evaluator) = next.selections.evaluators.iter_mut().find(|e| e.id == id) {
                evaluator.level = Some(Numeric::Int(level));
            }
        }
        WizardAction::ViewFactorType(kind) => {
            next.factor_view = kind;
        }
        WizardAction::ToggleFactor { kind, factor } => {
            next.selections.factors.toggle(kind, factor);
        }
        WizardAction::RemoveFactor { kind, id } => {
            next.selections.factors.remove_from_bucket(kind, &id);
        }
        WizardAction::ReplaceFactorBucket { kind, factors } => {
            next.selections.factors.replace_bucket(kind, factors);
        }
        WizardAction::Next => {
            next.go_to(state.active_step.next());
        }
        WizardAction::Previous => {
            next.active_step = state.active_step.previous();
        }
        WizardAction::JumpTo(step) => {
            if step > state.furthest_step {
                return Transition::rejected(state, ValidationError::StepLocked(step.to_string()));
            }
            next.active_step = step;
        }
        WizardAction::Reset => {
            next = WizardState::new(state.group);
        }
    }

    Transition::accepted(next)
}

fn whole_level(level: &Numeric) -> Option<i64> {
    let value = match level {
        Numeric::Int(n) => *n,
        Numeric::Float(f) if f.fract() == 0.0 => *f as i64,
        Numeric::Float(_) => return None,
        Numeric::Text(s) => s.trim().parse::<i64>().ok()?,
    };
    (1..=5).contains(&value).then_some(value)
}

/// Backend lists are not guaranteed unique; keep the first record per id
fn dedupe<T: super::Keyed>(items: Vec<T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect()
}
