//! Selection reconciliation for the campaign setup wizard
//!
//! Picker dialogs hand their results to the wizard as actions; the reducer in
//! [`wizard`] merges them into the running selections, keeps per-type factor
//! buckets consistent across navigation, and [`payload`] flattens the result
//! for the backend.

pub mod merge;
pub mod payload;
pub mod registry;
pub mod wizard;

pub use merge::Keyed;
pub use payload::SavePayload;
pub use registry::FactorRegistry;
pub use wizard::{reduce, WizardAction, WizardState, WizardStep};

use crate::model::{Employee, Evaluator};

/// The three collections the wizard accumulates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub employees: Vec<Employee>,
    pub evaluators: Vec<Evaluator>,
    pub factors: FactorRegistry,
}

impl Selections {
    pub fn counts(&self) -> SelectionCounts {
        SelectionCounts {
            employees: self.employees.len(),
            evaluators: self.evaluators.len(),
            factors: self.factors.total_selected(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCounts {
    pub employees: usize,
    pub evaluators: usize,
    pub factors: usize,
}
