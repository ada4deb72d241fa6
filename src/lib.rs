//! # cluster-validity
//!
//! Validity statistics for a clustering that has already been assigned: every
//! entity of a [`Dataset`] carries a cluster label, and this crate scores how
//! well those labels fit the data.
//!
//! - [`metrics::typical`]: per-attribute representatives of the dataset and of each cluster
//! - [`metrics::dunn`]: separation over diameter
//! - [`metrics::silhouette`](mod@metrics::silhouette): per-entity fit, optionally written back
//! - [`metrics::rand_index`](mod@metrics::rand_index): agreement between two labelings
//!
//! Distance-based metrics take any [`DistanceMeasure`]; the common ones are
//! listed in [`MeasureKind`]. [`Evaluator`] bundles the whole workflow behind an
//! [`EvaluationConfig`].
//!
//! The library logs through `tracing` and never installs a subscriber.
//!
//! Feature flags:
//!
//! - `parallel`: pairwise distances computed with rayon
//! - `serde`: serialize datasets, results and configuration

/// Evaluation settings.
pub mod config;
pub mod dataset;
pub mod distance;
/// Error types used across the crate.
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod partition;

#[cfg(test)]
mod scenario_tests;

pub use config::EvaluationConfig;
pub use dataset::{Attribute, AttributeKind, Dataset, Entity, EntityId, Value};
pub use distance::{DistanceMeasure, MeasureKind};
pub use error::{Error, Result};
pub use evaluate::{write_back_silhouette, Evaluator};
pub use metrics::{DunnIndex, PairCounts, RandIndex, Silhouette, TypicalValues};
pub use partition::{partition, ClusterGroup, Partition};
