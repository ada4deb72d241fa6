//! Pluggable distance measures.
//!
//! Every metric that needs distances takes a [`DistanceMeasure`]: a narrow
//! capability with a binding step (`init`) and a single `distance(a, b)`
//! operation. New measures only need to implement the trait. The metrics do
//! not inspect a measure beyond [`DistanceMeasure::is_bound`], and an unbound
//! measure only earns a `warn!` event.
//!
//! ```rust
//! use cluster_validity::dataset::{Attribute, Dataset};
//! use cluster_validity::distance::{DistanceMeasure, MeasureKind};
//!
//! let data = Dataset::from_rows(
//!     vec![Attribute::numeric("x"), Attribute::numeric("y")],
//!     vec![
//!         ("a".into(), vec![0.0.into(), 0.0.into()]),
//!         ("b".into(), vec![3.0.into(), 4.0.into()]),
//!     ],
//! )
//! .unwrap();
//!
//! let mut measure = MeasureKind::Euclidean.build();
//! measure.init(&data).unwrap();
//! assert_eq!(measure.distance(&data.entities()[0], &data.entities()[1]), 5.0);
//! ```

mod cache;
mod measures;
mod traits;

pub use cache::DistanceCache;
pub use measures::{
    ChebyshevDistance, EuclideanDistance, FnDistance, ManhattanDistance, MeasureKind,
    MixedEuclideanDistance, SquaredEuclideanDistance,
};
pub use traits::DistanceMeasure;
