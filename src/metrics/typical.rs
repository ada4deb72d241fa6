//! Typical values: per-attribute representatives of a scope.
//!
//! - **Nominal**: the mode, but only when it occurs at least `min_count` times
//!   (3 by default). All values tied at the highest count are reported. If no
//!   value reaches the threshold the attribute has no typical value (empty set).
//! - **Numeric**: a single median-like value. After a stable ascending sort,
//!   the element at index `n/2 - 1` is taken for even `n` (lower median) and
//!   `n/2` for odd `n`. An empty scope has no typical value.
//!
//! Missing numeric values sort after every number.

use crate::dataset::{Attribute, AttributeKind, Dataset, Entity, Value};
use crate::partition::Partition;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Default minimum number of occurrences for a nominal mode.
pub const DEFAULT_MIN_MODE_COUNT: usize = 3;

/// Attribute name → representative values (empty = no typical value).
pub type TypicalValueMap = BTreeMap<String, BTreeSet<String>>;

/// Typical values of every attribute over `entities`.
///
/// Every attribute of the schema is summarized, special ones included.
pub fn typical_values(dataset: &Dataset, entities: &[&Entity], min_mode_count: usize) -> TypicalValueMap {
    dataset
        .attributes()
        .iter()
        .enumerate()
        .map(|(index, attribute)| {
            (
                attribute.name().to_string(),
                attribute_typical_value(attribute, index, entities, min_mode_count),
            )
        })
        .collect()
}

fn attribute_typical_value(
    attribute: &Attribute,
    index: usize,
    entities: &[&Entity],
    min_mode_count: usize,
) -> BTreeSet<String> {
    match attribute.kind() {
        AttributeKind::Nominal => nominal_mode(
            entities.iter().map(|entity| entity.value(index)),
            min_mode_count,
        ),
        AttributeKind::Numeric => {
            lower_median(entities.iter().map(|entity| entity.value(index).as_numeric()))
                .map(|median| Value::Numeric(median).to_string())
                .into_iter()
                .collect()
        }
    }
}

/// Values tied at the highest count, provided that count is at least `min_count`.
pub fn nominal_mode<'v>(values: impl IntoIterator<Item = &'v Value>, min_count: usize) -> BTreeSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_nominal().into_owned()).or_insert(0) += 1;
    }

    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 || max < min_count {
        return BTreeSet::new();
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count == max)
        .map(|(value, _)| value)
        .collect()
}

/// Lower median of `values`: sorted index `n/2 - 1` for even `n`, `n/2` for odd `n`.
///
/// Returns `None` for an empty input.
pub fn lower_median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let center = if n % 2 == 0 { n / 2 - 1 } else { n / 2 };
    Some(sorted[center])
}

/// Typical values of a dataset, globally and per cluster.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypicalValues {
    global: TypicalValueMap,
    per_cluster: BTreeMap<String, TypicalValueMap>,
}

impl TypicalValues {
    /// Summarize the whole dataset and every group of `partition`.
    pub fn compute(dataset: &Dataset, partition: &Partition<'_>, min_mode_count: usize) -> Self {
        let all: Vec<&Entity> = dataset.iter().collect();
        let global = typical_values(dataset, &all, min_mode_count);
        let per_cluster = partition
            .iter()
            .map(|group| {
                (
                    group.label().to_string(),
                    typical_values(dataset, group.entities(), min_mode_count),
                )
            })
            .collect();

        Self {
            global,
            per_cluster,
        }
    }

    /// Typical values over the whole dataset.
    pub fn global(&self) -> &TypicalValueMap {
        &self.global
    }

    /// Typical values of one cluster.
    pub fn cluster(&self, label: &str) -> Option<&TypicalValueMap> {
        self.per_cluster.get(label)
    }

    /// Typical values of every cluster, keyed by label.
    pub fn clusters(&self) -> &BTreeMap<String, TypicalValueMap> {
        &self.per_cluster
    }
}
