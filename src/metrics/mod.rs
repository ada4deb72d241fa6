//! Cluster-validity metrics.
//!
//! Scores for a clustering result, either on its own (internal validity) or
//! against a second clustering of the same entities (external validity).
//!
//! # Metrics Overview
//!
//! | Metric | Range | Best | Needs |
//! |--------|-------|------|-------|
//! | [`dunn`] | [0, ∞) | high | partition + distance, ≥ 2 clusters |
//! | [`silhouette`](mod@silhouette) | [-1, 1] | 1 | partition + distance |
//! | [`rand_index`](mod@rand_index) | [0, 1] | 1 | two labelings of the same entities |
//! | [`typical`] | - | - | partition |
//!
//! # When to Use Which
//!
//! - **Dunn**: worst-case view; one stretched cluster or one close pair of
//!   clusters dominates the score
//! - **Silhouette**: per-entity view; shows which members sit badly
//! - **Rand**: agreement between two clusterings, no distances involved
//! - **Typical values**: describe what a cluster looks like
//!
//! # Example
//!
//! ```rust
//! use cluster_validity::dataset::{Attribute, Dataset, Value};
//! use cluster_validity::distance::{DistanceMeasure, EuclideanDistance};
//! use cluster_validity::metrics::{dunn_index, silhouette};
//! use cluster_validity::partition::partition;
//!
//! let data = Dataset::from_rows(
//!     vec![Attribute::numeric("x"), Attribute::nominal("cluster").with_role("cluster")],
//!     vec![
//!         ("1".into(), vec![Value::from(0.0), Value::from("a")]),
//!         ("2".into(), vec![Value::from(1.0), Value::from("a")]),
//!         ("3".into(), vec![Value::from(9.0), Value::from("b")]),
//!         ("4".into(), vec![Value::from(10.0), Value::from("b")]),
//!     ],
//! )
//! .unwrap();
//!
//! let mut measure = EuclideanDistance::new();
//! measure.init(&data).unwrap();
//! let groups = partition(&data, "cluster").unwrap();
//!
//! assert_eq!(dunn_index(&groups, &measure).unwrap(), 8.0);
//! assert!(silhouette(&groups, &measure).cluster_mean("a").unwrap() > 0.8);
//! ```
//!
//! # References
//!
//! - Dunn (1973). "A Fuzzy Relative of the ISODATA Process"
//! - Rousseeuw (1987). "Silhouettes: a graphical aid to the interpretation and
//!   validation of cluster analysis"
//! - Rand (1971). "Objective criteria for the evaluation of clustering methods"

pub mod dunn;
pub mod rand_index;
pub mod silhouette;
pub mod typical;

pub use dunn::{dunn_index, DunnIndex};
pub use rand_index::{pair_counts, rand_index, PairCounts, RandIndex};
pub use silhouette::{silhouette, Silhouette};
pub use typical::{typical_values, TypicalValueMap, TypicalValues};
