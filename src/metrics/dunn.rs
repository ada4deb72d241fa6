//! Dunn index: separation over diameter.
//!
//! ```text
//! D = min_{A ≠ B} min_{a ∈ A, b ∈ B} d(a, b)  /  max_C max_{x, y ∈ C} d(x, y)
//! ```
//!
//! Higher is better: compact clusters that lie far apart. When no cluster has a
//! positive diameter (all singletons, or only duplicates) the index is `0.0`.

use crate::distance::DistanceMeasure;
use crate::error::{Error, Result};
use crate::partition::{ClusterGroup, Partition};

/// Dunn index together with the two extremes it is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DunnIndex {
    /// Smallest distance between members of two different clusters.
    pub min_inter: f64,
    /// Largest distance between two members of the same cluster.
    pub max_intra: f64,
    /// `min_inter / max_intra`, or `0.0` when `max_intra == 0`.
    pub value: f64,
}

impl DunnIndex {
    /// Compute the Dunn index of `partition`.
    ///
    /// Requires at least two clusters. `measure` must already be bound with
    /// [`DistanceMeasure::init`]; an unbound built-in measure yields `0.0`.
    pub fn compute<M>(partition: &Partition<'_>, measure: &M) -> Result<Self>
    where
        M: DistanceMeasure + ?Sized,
    {
        if !measure.is_bound() {
            tracing::warn!(measure = measure.name(), "dunn index computed with an unbound measure");
        }
        if partition.len() < 2 {
            return Err(Error::InsufficientClusters {
                required: 2,
                found: partition.len(),
            });
        }

        let groups = partition.groups();
        let mut min_inter = f64::INFINITY;
        for (i, group) in groups.iter().enumerate() {
            for other in &groups[i + 1..] {
                min_inter = min_inter.min(separation(group, other, measure));
            }
        }

        let max_intra = groups
            .iter()
            .map(|group| diameter(group, measure))
            .fold(0.0, f64::max);

        let value = if max_intra == 0.0 {
            0.0
        } else {
            min_inter / max_intra
        };

        tracing::debug!(min_inter, max_intra, value, "dunn index");
        Ok(Self {
            min_inter,
            max_intra,
            value,
        })
    }
}

/// Dunn index of `partition` under `measure`.
pub fn dunn_index<M>(partition: &Partition<'_>, measure: &M) -> Result<f64>
where
    M: DistanceMeasure + ?Sized,
{
    DunnIndex::compute(partition, measure).map(|dunn| dunn.value)
}

/// Largest pairwise distance inside one group; `0.0` below two members.
fn diameter<M>(group: &ClusterGroup<'_>, measure: &M) -> f64
where
    M: DistanceMeasure + ?Sized,
{
    let members = group.entities();
    let mut max = 0.0_f64;
    for (i, a) in members.iter().enumerate() {
        for b in &members[i + 1..] {
            max = max.max(measure.distance(a, b));
        }
    }
    max
}

/// Smallest distance between a member of `a` and a member of `b`.
fn separation<M>(a: &ClusterGroup<'_>, b: &ClusterGroup<'_>, measure: &M) -> f64
where
    M: DistanceMeasure + ?Sized,
{
    a.entities()
        .iter()
        .flat_map(|x| b.entities().iter().map(move |y| measure.distance(x, y)))
        .fold(f64::INFINITY, f64::min)
}
