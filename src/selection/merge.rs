//! Identity-map merge of picker results into a running selection

use std::collections::HashMap;

use crate::model::{Employee, Evaluator, ItemId};

/// A selectable record identified by id
pub trait Keyed: Clone {
    fn id(&self) -> &ItemId;

    /// Copy locally owned fields from the already-selected copy of this item
    fn adopt_local(&mut self, _existing: &Self) {}
}

impl Keyed for Employee {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl Keyed for Evaluator {
    fn id(&self) -> &ItemId {
        &self.id
    }

    // Level is edited in the wizard and survives a re-pick; unset stays unset.
    fn adopt_local(&mut self, existing: &Self) {
        self.level = existing.level.clone();
    }
}

/// Merge `picked` into `existing`.
///
/// Existing items keep their relative order, overlapping ids take the picked
/// record (plus the existing locally owned fields) in the existing slot, and
/// new ids are appended in picked order. Duplicates inside `picked` collapse
/// to the last occurrence.
pub fn merge_by_id<T: Keyed>(existing: &[T], picked: Vec<T>) -> Vec<T> {
    if picked.is_empty() {
        return existing.to_vec();
    }

    let mut latest: HashMap<ItemId, T> = HashMap::with_capacity(picked.len());
    let mut appended: Vec<ItemId> = Vec::new();
    let existing_ids: HashMap<&ItemId, &T> = existing.iter().map(|item| (item.id(), item)).collect();

    for item in picked {
        let id = item.id().clone();
        if !existing_ids.contains_key(&id) && !latest.contains_key(&id) {
            appended.push(id.clone());
        }
        latest.insert(id, item);
    }

    let mut merged = Vec::with_capacity(existing.len() + appended.len());
    for current in existing {
        match latest.remove(current.id()) {
            Some(mut replacement) => {
                replacement.adopt_local(current);
                merged.push(replacement);
            }
            None => merged.push(current.clone()),
        }
    }
    for id in appended {
        if let Some(item) = latest.remove(&id) {
            merged.push(item);
        }
    }

    merged
}
