//! Distance measure trait.

use crate::dataset::{Dataset, Entity};
use crate::error::Result;

/// A pluggable distance between two entities of one dataset.
///
/// Implementations must be symmetric, non-negative and deterministic for a
/// fixed binding, with `distance(a, a) == 0`. The metrics assume this and do
/// not re-check it.
pub trait DistanceMeasure: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Bind the measure to the dataset schema.
    ///
    /// Calling `init` again re-binds the measure; it must be called before the
    /// first [`distance`](Self::distance).
    fn init(&mut self, dataset: &Dataset) -> Result<()>;

    /// Distance between two entities of the bound dataset.
    fn distance(&self, a: &Entity, b: &Entity) -> f64;

    /// Whether [`init`](Self::init) has bound the measure.
    ///
    /// An unbound built-in measure reads no attributes and reports `0.0` for
    /// every pair. Measures that need no binding keep the default.
    fn is_bound(&self) -> bool {
        true
    }
}

impl<M: DistanceMeasure + ?Sized> DistanceMeasure for Box<M> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn init(&mut self, dataset: &Dataset) -> Result<()> {
        (**self).init(dataset)
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        (**self).distance(a, b)
    }

    fn is_bound(&self) -> bool {
        (**self).is_bound()
    }
}
