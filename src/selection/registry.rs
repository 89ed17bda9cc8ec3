//! Per-type factor selections

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Factor, FactorType, ItemId};

/// Selected factors bucketed by catalog type.
///
/// Buckets are independent: the same id may be selected under several types
/// because each type is fetched from its own catalog. Within a bucket an id
/// appears at most once and order is selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactorRegistry {
    buckets: BTreeMap<FactorType, Vec<Factor>>,
}

/// Per-type line of the review summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub kind: FactorType,
    pub count: usize,
    pub names: String,
}

impl FactorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket factors loaded with a campaign by their declared type
    pub fn from_factors<I: IntoIterator<Item = Factor>>(factors: I) -> Self {
        let mut registry = Self::new();
        for factor in factors {
            let kind = factor.kind.unwrap_or(FactorType::Qualitative);
            if !registry.is_selected(kind, &factor.id) {
                registry.buckets.entry(kind).or_default().push(factor);
            }
        }
        registry
    }

    /// Remove the factor from `kind` if selected there, otherwise append it
    pub fn toggle(&mut self, kind: FactorType, factor: Factor) {
        let bucket = self.buckets.entry(kind).or_default();
        match bucket.iter().position(|f| f.id == factor.id) {
            Some(index) => {
                bucket.remove(index);
            }
            None => bucket.push(factor),
        }
    }

    pub fn is_selected(&self, kind: FactorType, id: &ItemId) -> bool {
        self.buckets
            .get(&kind)
            .map(|bucket| bucket.iter().any(|f| &f.id == id))
            .unwrap_or(false)
    }

    pub fn total_selected(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn remove_from_bucket(&mut self, kind: FactorType, id: &ItemId) {
        if let Some(bucket) = self.buckets.get_mut(&kind) {
            bucket.retain(|f| &f.id != id);
        }
    }

    /// Replace one bucket wholesale (factor picker confirmation)
    pub fn replace_bucket(&mut self, kind: FactorType, factors: Vec<Factor>) {
        let mut bucket: Vec<Factor> = Vec::with_capacity(factors.len());
        for factor in factors {
            if !bucket.iter().any(|f| f.id == factor.id) {
                bucket.push(factor);
            }
        }
        self.buckets.insert(kind, bucket);
    }

    #[cfg(test)]
    pub fn bucket(&self, kind: FactorType) -> &[Factor] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty buckets in qualitative, quantitative, recommended order
    pub fn iter(&self) -> impl Iterator<Item = (FactorType, &[Factor])> {
        self.buckets
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(kind, bucket)| (*kind, bucket.as_slice()))
    }

    pub fn flatten(&self) -> impl Iterator<Item = &Factor> {
        self.iter().flat_map(|(_, bucket)| bucket.iter())
    }

    pub fn summary(&self) -> Vec<BucketSummary> {
        self.iter()
            .map(|(kind, bucket)| BucketSummary {
                kind,
                count: bucket.len(),
                names: bucket
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_ids(registry: &FactorRegistry, kind: FactorType) -> Vec<ItemId> {
        registry.bucket(kind).iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut registry = FactorRegistry::new();
        registry.toggle(FactorType::Qualitative, Factor::new(1, "Teamwork"));
        registry.toggle(FactorType::Qualitative, Factor::new(2, "Initiative"));
        let before = bucket_ids(&registry, FactorType::Qualitative);

        registry.toggle(FactorType::Qualitative, Factor::new(1, "Teamwork"));
        assert!(!registry.is_selected(FactorType::Qualitative, &ItemId::from(1)));
        registry.toggle(FactorType::Qualitative, Factor::new(1, "Teamwork"));

        let mut after = bucket_ids(&registry, FactorType::Qualitative);
        // re-added id moves to the end
        assert_eq!(after, vec![ItemId::from(2), ItemId::from(1)]);
        let mut before_sorted = before;
        before_sorted.sort();
        after.sort();
        assert_eq!(before_sorted, after);
    }

    #[test]
    fn test_buckets_are_independent() {
        let mut registry = FactorRegistry::new();
        registry.toggle(FactorType::Qualitative, Factor::new(7, "Communication"));
        assert!(registry.is_selected(FactorType::Qualitative, &ItemId::from(7)));
        assert!(!registry.is_selected(FactorType::Quantitative, &ItemId::from(7)));

        registry.toggle(FactorType::Quantitative, Factor::new(7, "Sales volume"));
        assert_eq!(registry.total_selected(), 2);

        registry.remove_from_bucket(FactorType::Qualitative, &ItemId::from(7));
        assert!(registry.is_selected(FactorType::Quantitative, &ItemId::from(7)));
        assert_eq!(registry.total_selected(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut registry = FactorRegistry::new();
        registry.toggle(FactorType::Recommended, Factor::new(1, "Mentoring"));
        registry.remove_from_bucket(FactorType::Recommended, &ItemId::from(99));
        registry.remove_from_bucket(FactorType::Quantitative, &ItemId::from(1));
        assert_eq!(registry.total_selected(), 1);
    }

    #[test]
    fn test_flatten_follows_type_order() {
        let mut registry = FactorRegistry::new();
        registry.toggle(FactorType::Recommended, Factor::new(30, "R"));
        registry.toggle(FactorType::Qualitative, Factor::new(10, "Q"));
        registry.toggle(FactorType::Quantitative, Factor::new(20, "N"));
        let order: Vec<ItemId> = registry.flatten().map(|f| f.id.clone()).collect();
        assert_eq!(order, vec![ItemId::from(10), ItemId::from(20), ItemId::from(30)]);
    }

    #[test]
    fn test_replace_bucket_dedupes() {
        let mut registry = FactorRegistry::new();
        registry.toggle(FactorType::Quantitative, Factor::new(1, "Old"));
        registry.replace_bucket(
            FactorType::Quantitative,
            vec![Factor::new(2, "A"), Factor::new(3, "B"), Factor::new(2, "A again")],
        );
        assert_eq!(
            bucket_ids(&registry, FactorType::Quantitative),
            vec![ItemId::from(2), ItemId::from(3)]
        );
        assert_eq!(registry.bucket(FactorType::Quantitative)[0].name, "A");
    }

    #[test]
    fn test_from_factors_uses_declared_type() {
        let registry = FactorRegistry::from_factors(vec![
            Factor::new(1, "Typed").of_kind(FactorType::Recommended),
            Factor::new(2, "Untyped"),
        ]);
        assert!(registry.is_selected(FactorType::Recommended, &ItemId::from(1)));
        assert!(registry.is_selected(FactorType::Qualitative, &ItemId::from(2)));
        let summary = registry.summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].kind, FactorType::Qualitative);
        assert_eq!(summary[0].names, "Untyped");
    }
}
