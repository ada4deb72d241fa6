//! Silhouette coefficients.
//!
//! For entity `i` in cluster `A`:
//!
//! ```text
//! a(i) = mean d(i, j) over the other members j of A
//! b(i) = min over clusters C ≠ A of mean d(i, j) over all members j of C
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//! ```
//!
//! `s(i)` lies in `[-1, 1]`: near 1 the entity sits well inside its cluster,
//! near -1 it would fit the neighbouring cluster better. Members of singleton
//! clusters get `0`, as does any entity with `a(i) == b(i)`.
//!
//! Degenerate partitions: no clusters give an empty result; a single cluster
//! gets a mean of `0.0` and no per-entity coefficients.
//!
//! Every pairwise distance is evaluated once per computation and cached in a
//! [`DistanceCache`].

use crate::distance::{DistanceCache, DistanceMeasure};
use crate::partition::Partition;
use std::collections::BTreeMap;
use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-entity and per-cluster silhouette of a partition.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Silhouette {
    coefficients: BTreeMap<String, Vec<f64>>,
    cluster_means: BTreeMap<String, f64>,
}

impl Silhouette {
    /// Compute the silhouette of every entity of `partition`.
    ///
    /// `measure` must already be bound with [`DistanceMeasure::init`].
    pub fn compute<M>(partition: &Partition<'_>, measure: &M) -> Self
    where
        M: DistanceMeasure + ?Sized,
    {
        if !measure.is_bound() {
            tracing::warn!(measure = measure.name(), "silhouette computed with an unbound measure");
        }
        match partition.len() {
            0 => Self::default(),
            1 => {
                let label = partition.groups()[0].label().to_string();
                Self {
                    coefficients: BTreeMap::new(),
                    cluster_means: BTreeMap::from([(label, 0.0)]),
                }
            }
            _ => Self::compute_separated(partition, measure),
        }
    }

    fn compute_separated<M>(partition: &Partition<'_>, measure: &M) -> Self
    where
        M: DistanceMeasure + ?Sized,
    {
        // Flatten in partition order; group k owns ranges[k] of the flat list.
        let mut flat = Vec::with_capacity(partition.n_entities());
        let mut ranges = Vec::with_capacity(partition.len());
        for group in partition {
            let start = flat.len();
            flat.extend_from_slice(group.entities());
            ranges.push(start..flat.len());
        }
        let cache = DistanceCache::compute(&flat, measure);

        // Owning group of every flat index.
        let owners: Vec<usize> = ranges
            .iter()
            .enumerate()
            .flat_map(|(k, range)| range.clone().map(move |_| k))
            .collect();

        #[cfg(feature = "parallel")]
        let all: Vec<f64> = (0..flat.len())
            .into_par_iter()
            .map(|i| entity_coefficient(&cache, &ranges, owners[i], i))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let all: Vec<f64> = (0..flat.len())
            .map(|i| entity_coefficient(&cache, &ranges, owners[i], i))
            .collect();

        let mut coefficients = BTreeMap::new();
        let mut cluster_means = BTreeMap::new();
        for (group, range) in partition.iter().zip(&ranges) {
            let values = all[range.clone()].to_vec();
            let _ = cluster_means.insert(group.label().to_string(), mean(&values));
            let _ = coefficients.insert(group.label().to_string(), values);
        }

        Self {
            coefficients,
            cluster_means,
        }
    }

    /// Per-entity coefficients by cluster label, in partition order.
    pub fn coefficients(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.coefficients
    }

    /// Coefficients of one cluster, aligned with the partition group.
    pub fn cluster_coefficients(&self, label: &str) -> Option<&[f64]> {
        self.coefficients.get(label).map(Vec::as_slice)
    }

    /// Mean coefficient by cluster label.
    pub fn cluster_means(&self) -> &BTreeMap<String, f64> {
        &self.cluster_means
    }

    /// Mean coefficient of one cluster.
    pub fn cluster_mean(&self, label: &str) -> Option<f64> {
        self.cluster_means.get(label).copied()
    }

    /// Mean over every per-entity coefficient; `None` when there are none.
    pub fn overall_mean(&self) -> Option<f64> {
        let (sum, count) = self
            .coefficients
            .values()
            .flatten()
            .fold((0.0, 0usize), |(sum, count), &s| (sum + s, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Whether no cluster was evaluated.
    pub fn is_empty(&self) -> bool {
        self.cluster_means.is_empty()
    }
}

/// Silhouette of `partition` under `measure`.
pub fn silhouette<M>(partition: &Partition<'_>, measure: &M) -> Silhouette
where
    M: DistanceMeasure + ?Sized,
{
    Silhouette::compute(partition, measure)
}

/// Silhouette coefficient from the mean intra distance `a` and the mean
/// distance `b` to the nearest other cluster.
pub fn coefficient(a: f64, b: f64) -> f64 {
    if a < b {
        if b != 0.0 {
            1.0 - a / b
        } else {
            0.0
        }
    } else if a > b {
        if a != 0.0 {
            b / a - 1.0
        } else {
            0.0
        }
    } else {
        0.0
    }
}

fn entity_coefficient(cache: &DistanceCache, ranges: &[Range<usize>], owner: usize, i: usize) -> f64 {
    let own = &ranges[owner];
    let own_len = own.len();
    if own_len == 1 {
        return 0.0;
    }

    // d(i, i) is zero, so the row sum over the own range only counts the others.
    let a = cache.row_sum(i, own.clone()) / (own_len - 1) as f64;
    let b = ranges
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != owner)
        .map(|(_, range)| cache.row_sum(i, range.clone()) / range.len() as f64)
        .fold(f64::INFINITY, f64::min);

    coefficient(a, b)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
