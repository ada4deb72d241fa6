//! Grouping of entities by cluster label.
//!
//! A [`Partition`] maps every cluster label to the ordered list of entities
//! carrying it. Groups appear in order of first sighting and members keep the
//! dataset's insertion order, so two partitions of the same dataset are
//! identical. Consumers that write per-entity results back onto the dataset
//! rely on that alignment.
//!
//! Labels are taken verbatim: a missing label becomes the group `"?"`, an
//! empty string is its own group. Nothing is validated.

use crate::dataset::{Dataset, Entity};
use crate::error::Result;
use std::collections::HashMap;

/// Entities sharing one cluster label.
#[derive(Debug, Clone)]
pub struct ClusterGroup<'a> {
    label: String,
    positions: Vec<usize>,
    entities: Vec<&'a Entity>,
}

impl<'a> ClusterGroup<'a> {
    /// Cluster label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Members in dataset order.
    pub fn entities(&self) -> &[&'a Entity] {
        &self.entities
    }

    /// Dataset positions of the members, aligned with [`entities`](Self::entities).
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the group has no members. Never true for a built partition.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Entities of a dataset grouped by cluster label.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    groups: Vec<ClusterGroup<'a>>,
    lookup: HashMap<String, usize>,
    n_entities: usize,
}

impl<'a> Partition<'a> {
    /// Group `dataset` by the value of `cluster_attribute`.
    ///
    /// Fails only when the attribute does not exist.
    pub fn from_dataset(dataset: &'a Dataset, cluster_attribute: &str) -> Result<Self> {
        let (index, _) = dataset.attribute(cluster_attribute)?;
        let mut partition = Partition::default();

        for (position, entity) in dataset.iter().enumerate() {
            let label = entity.value(index).as_nominal();
            let slot = match partition.lookup.get(&*label) {
                Some(&slot) => slot,
                None => {
                    let slot = partition.groups.len();
                    let _ = partition.lookup.insert(label.to_string(), slot);
                    partition.groups.push(ClusterGroup {
                        label: label.into_owned(),
                        positions: Vec::new(),
                        entities: Vec::new(),
                    });
                    slot
                }
            };
            let group = &mut partition.groups[slot];
            group.positions.push(position);
            group.entities.push(entity);
        }
        partition.n_entities = dataset.len();

        tracing::debug!(
            attribute = cluster_attribute,
            clusters = partition.len(),
            entities = partition.n_entities,
            "partitioned dataset"
        );
        Ok(partition)
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no clusters (empty dataset).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entities over all groups.
    pub fn n_entities(&self) -> usize {
        self.n_entities
    }

    /// Group with the given label.
    pub fn get(&self, label: &str) -> Option<&ClusterGroup<'a>> {
        self.lookup.get(label).map(|&slot| &self.groups[slot])
    }

    /// Groups in order of first sighting.
    pub fn groups(&self) -> &[ClusterGroup<'a>] {
        &self.groups
    }

    /// Iterate groups in order of first sighting.
    pub fn iter(&self) -> std::slice::Iter<'_, ClusterGroup<'a>> {
        self.groups.iter()
    }

    /// Cluster labels in order of first sighting.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(ClusterGroup::label)
    }
}

impl<'p, 'a> IntoIterator for &'p Partition<'a> {
    type Item = &'p ClusterGroup<'a>;
    type IntoIter = std::slice::Iter<'p, ClusterGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group `dataset` by the value of `cluster_attribute`.
pub fn partition<'a>(dataset: &'a Dataset, cluster_attribute: &str) -> Result<Partition<'a>> {
    Partition::from_dataset(dataset, cluster_attribute)
}
