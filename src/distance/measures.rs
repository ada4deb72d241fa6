//! Built-in distance measures.
//!
//! | Measure | Attributes read | Formula |
//! |---------|-----------------|---------|
//! | [`EuclideanDistance`] | numeric | `sqrt(Σ (xᵢ - yᵢ)²)` |
//! | [`SquaredEuclideanDistance`] | numeric | `Σ (xᵢ - yᵢ)²` |
//! | [`ManhattanDistance`] | numeric | `Σ abs(xᵢ - yᵢ)` |
//! | [`ChebyshevDistance`] | numeric | `max abs(xᵢ - yᵢ)` |
//! | [`MixedEuclideanDistance`] | numeric + nominal | `sqrt(Σ (xᵢ - yᵢ)² + Σ [uⱼ ≠ vⱼ])` |
//!
//! Only regular attributes are read. Coordinates where either side is missing
//! are skipped.

use super::traits::DistanceMeasure;
use crate::dataset::{AttributeKind, Dataset, Entity};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Schema indices of the regular numeric attributes.
#[derive(Debug, Clone, Default)]
struct NumericBinding {
    indices: Vec<usize>,
    bound: bool,
}

impl NumericBinding {
    fn bind(&mut self, measure: &'static str, dataset: &Dataset) -> Result<()> {
        let indices: Vec<usize> = dataset
            .regular_attributes()
            .filter(|(_, attribute)| attribute.kind() == AttributeKind::Numeric)
            .map(|(index, _)| index)
            .collect();
        if indices.is_empty() {
            return Err(Error::IncompatibleMeasure {
                measure,
                reason: "dataset has no regular numeric attributes".to_string(),
            });
        }
        self.indices = indices;
        self.bound = true;
        Ok(())
    }

    /// Absolute coordinate differences, skipping missing coordinates.
    fn abs_diffs<'a>(&'a self, a: &'a Entity, b: &'a Entity) -> impl Iterator<Item = f64> + 'a {
        debug_assert!(self.bound, "distance measure used before init");
        self.indices.iter().filter_map(move |&index| {
            let x = a.value(index).as_numeric();
            let y = b.value(index).as_numeric();
            if x.is_nan() || y.is_nan() {
                None
            } else {
                Some((x - y).abs())
            }
        })
    }
}

/// Euclidean distance over numeric attributes.
#[derive(Debug, Clone, Default)]
pub struct EuclideanDistance {
    binding: NumericBinding,
}

impl EuclideanDistance {
    /// Create an unbound measure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DistanceMeasure for EuclideanDistance {
    fn name(&self) -> &'static str {
        "euclidean"
    }

    fn init(&mut self, dataset: &Dataset) -> Result<()> {
        let name = self.name();
        self.binding.bind(name, dataset)
    }

    fn is_bound(&self) -> bool {
        self.binding.bound
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        self.binding.abs_diffs(a, b).map(|d| d * d).sum::<f64>().sqrt()
    }
}

/// Squared Euclidean distance (a Bregman divergence) over numeric attributes.
#[derive(Debug, Clone, Default)]
pub struct SquaredEuclideanDistance {
    binding: NumericBinding,
}

impl SquaredEuclideanDistance {
    /// Create an unbound measure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DistanceMeasure for SquaredEuclideanDistance {
    fn name(&self) -> &'static str {
        "squared_euclidean"
    }

    fn init(&mut self, dataset: &Dataset) -> Result<()> {
        let name = self.name();
        self.binding.bind(name, dataset)
    }

    fn is_bound(&self) -> bool {
        self.binding.bound
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        self.binding.abs_diffs(a, b).map(|d| d * d).sum()
    }
}

/// Manhattan (city block) distance over numeric attributes.
#[derive(Debug, Clone, Default)]
pub struct ManhattanDistance {
    binding: NumericBinding,
}

impl ManhattanDistance {
    /// Create an unbound measure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DistanceMeasure for ManhattanDistance {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn init(&mut self, dataset: &Dataset) -> Result<()> {
        let name = self.name();
        self.binding.bind(name, dataset)
    }

    fn is_bound(&self) -> bool {
        self.binding.bound
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        self.binding.abs_diffs(a, b).sum()
    }
}

/// Chebyshev (maximum coordinate) distance over numeric attributes.
#[derive(Debug, Clone, Default)]
pub struct ChebyshevDistance {
    binding: NumericBinding,
}

impl ChebyshevDistance {
    /// Create an unbound measure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DistanceMeasure for ChebyshevDistance {
    fn name(&self) -> &'static str {
        "chebyshev"
    }

    fn init(&mut self, dataset: &Dataset) -> Result<()> {
        let name = self.name();
        self.binding.bind(name, dataset)
    }

    fn is_bound(&self) -> bool {
        self.binding.bound
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        self.binding.abs_diffs(a, b).fold(0.0, f64::max)
    }
}

/// Euclidean distance that also counts nominal mismatches.
///
/// Every regular nominal attribute whose values differ contributes `1` to the
/// squared sum.
#[derive(Debug, Clone, Default)]
pub struct MixedEuclideanDistance {
    numeric: Vec<usize>,
    nominal: Vec<usize>,
    bound: bool,
}

impl MixedEuclideanDistance {
    /// Create an unbound measure.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DistanceMeasure for MixedEuclideanDistance {
    fn name(&self) -> &'static str {
        "mixed_euclidean"
    }

    fn init(&mut self, dataset: &Dataset) -> Result<()> {
        let (numeric, nominal): (Vec<_>, Vec<_>) = dataset
            .regular_attributes()
            .partition(|(_, attribute)| attribute.kind() == AttributeKind::Numeric);
        if numeric.is_empty() && nominal.is_empty() {
            return Err(Error::IncompatibleMeasure {
                measure: self.name(),
                reason: "dataset has no regular attributes".to_string(),
            });
        }
        self.numeric = numeric.into_iter().map(|(index, _)| index).collect();
        self.nominal = nominal.into_iter().map(|(index, _)| index).collect();
        self.bound = true;
        Ok(())
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        let numeric: f64 = self
            .numeric
            .iter()
            .map(|&index| a.value(index).as_numeric() - b.value(index).as_numeric())
            .filter(|d| !d.is_nan())
            .map(|d| d * d)
            .sum();
        let nominal = self
            .nominal
            .iter()
            .filter(|&&index| a.value(index) != b.value(index))
            .count();
        (numeric + nominal as f64).sqrt()
    }
}

/// Any closure `Fn(&Entity, &Entity) -> f64` used as a measure.
///
/// Binding is a no-op; the closure is responsible for its own schema access.
pub struct FnDistance<F> {
    f: F,
}

impl<F> FnDistance<F>
where
    F: Fn(&Entity, &Entity) -> f64 + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnDistance<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDistance").finish_non_exhaustive()
    }
}

impl<F> DistanceMeasure for FnDistance<F>
where
    F: Fn(&Entity, &Entity) -> f64 + Send + Sync,
{
    fn name(&self) -> &'static str {
        "custom"
    }

    fn init(&mut self, _dataset: &Dataset) -> Result<()> {
        Ok(())
    }

    fn distance(&self, a: &Entity, b: &Entity) -> f64 {
        (self.f)(a, b)
    }
}

/// Selector for the built-in measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureKind {
    /// [`EuclideanDistance`].
    Euclidean,
    /// [`SquaredEuclideanDistance`].
    SquaredEuclidean,
    /// [`ManhattanDistance`].
    Manhattan,
    /// [`ChebyshevDistance`].
    Chebyshev,
    /// [`MixedEuclideanDistance`].
    #[default]
    MixedEuclidean,
}

impl MeasureKind {
    /// All selectable measures.
    pub const ALL: [MeasureKind; 5] = [
        MeasureKind::Euclidean,
        MeasureKind::SquaredEuclidean,
        MeasureKind::Manhattan,
        MeasureKind::Chebyshev,
        MeasureKind::MixedEuclidean,
    ];

    /// Name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            MeasureKind::Euclidean => "euclidean",
            MeasureKind::SquaredEuclidean => "squared_euclidean",
            MeasureKind::Manhattan => "manhattan",
            MeasureKind::Chebyshev => "chebyshev",
            MeasureKind::MixedEuclidean => "mixed_euclidean",
        }
    }

    /// Create an unbound instance of the measure.
    pub fn build(self) -> Box<dyn DistanceMeasure> {
        match self {
            MeasureKind::Euclidean => Box::new(EuclideanDistance::new()),
            MeasureKind::SquaredEuclidean => Box::new(SquaredEuclideanDistance::new()),
            MeasureKind::Manhattan => Box::new(ManhattanDistance::new()),
            MeasureKind::Chebyshev => Box::new(ChebyshevDistance::new()),
            MeasureKind::MixedEuclidean => Box::new(MixedEuclideanDistance::new()),
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        MeasureKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or(Error::InvalidParameter {
                name: "measure",
                message: "unknown distance measure",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Attribute, Value};

    fn dataset() -> Dataset {
        Dataset::from_rows(
            vec![
                Attribute::numeric("x"),
                Attribute::numeric("y"),
                Attribute::nominal("color"),
                Attribute::nominal("cluster").with_role("cluster"),
            ],
            vec![
                ("a".into(), vec![0.0.into(), 0.0.into(), "red".into(), "c1".into()]),
                ("b".into(), vec![3.0.into(), 4.0.into(), "blue".into(), "c2".into()]),
                ("c".into(), vec![Value::Missing, 1.0.into(), "red".into(), "c1".into()]),
            ],
        )
        .unwrap()
    }

    fn bound(kind: MeasureKind, dataset: &Dataset) -> Box<dyn DistanceMeasure> {
        let mut measure = kind.build();
        measure.init(dataset).unwrap();
        measure
    }

    #[test]
    fn test_numeric_measures() {
        let data = dataset();
        let (a, b) = (&data.entities()[0], &data.entities()[1]);

        assert!((bound(MeasureKind::Euclidean, &data).distance(a, b) - 5.0).abs() < 1e-12);
        assert!((bound(MeasureKind::SquaredEuclidean, &data).distance(a, b) - 25.0).abs() < 1e-12);
        assert!((bound(MeasureKind::Manhattan, &data).distance(a, b) - 7.0).abs() < 1e-12);
        assert!((bound(MeasureKind::Chebyshev, &data).distance(a, b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unbound_measures_report_it() {
        let data = dataset();
        for kind in MeasureKind::ALL {
            let mut measure = kind.build();
            assert!(!measure.is_bound(), "{kind} bound before init");
            measure.init(&data).unwrap();
            assert!(measure.is_bound(), "{kind} unbound after init");
        }
        assert!(FnDistance::new(|_: &Entity, _: &Entity| 1.0).is_bound());
    }

    #[test]
    fn test_mixed_counts_nominal_mismatch_but_not_roles() {
        let data = dataset();
        let (a, b) = (&data.entities()[0], &data.entities()[1]);
        let d = bound(MeasureKind::MixedEuclidean, &data).distance(a, b);
        // 9 + 16 + 1 (color differs); the cluster role is ignored.
        assert!((d - 26f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_coordinates_are_skipped() {
        let data = dataset();
        let (a, c) = (&data.entities()[0], &data.entities()[2]);
        let d = bound(MeasureKind::Euclidean, &data).distance(a, c);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_and_zero_on_self() {
        let data = dataset();
        for kind in MeasureKind::ALL {
            let measure = bound(kind, &data);
            for x in data.iter() {
                assert_eq!(measure.distance(x, x), 0.0, "{kind}");
                for y in data.iter() {
                    assert_eq!(measure.distance(x, y), measure.distance(y, x), "{kind}");
                }
            }
        }
    }

    #[test]
    fn test_numeric_measure_needs_numeric_attribute() {
        let data = Dataset::from_rows(
            vec![Attribute::nominal("color")],
            vec![("a".into(), vec!["red".into()])],
        )
        .unwrap();
        let mut measure = EuclideanDistance::new();
        assert!(matches!(
            measure.init(&data),
            Err(Error::IncompatibleMeasure { measure: "euclidean", .. })
        ));
        assert!(MixedEuclideanDistance::new().init(&data).is_ok());
    }

    #[test]
    fn test_measure_kind_parsing() {
        assert_eq!("Euclidean".parse::<MeasureKind>().unwrap(), MeasureKind::Euclidean);
        assert_eq!(
            "squared-euclidean".parse::<MeasureKind>().unwrap(),
            MeasureKind::SquaredEuclidean
        );
        assert!("cosine".parse::<MeasureKind>().is_err());
        for kind in MeasureKind::ALL {
            assert_eq!(kind.to_string().parse::<MeasureKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_fn_distance() {
        let data = dataset();
        let mut measure = FnDistance::new(|a: &Entity, b: &Entity| {
            if a.id() == b.id() {
                0.0
            } else {
                1.0
            }
        });
        measure.init(&data).unwrap();
        assert_eq!(measure.distance(&data.entities()[0], &data.entities()[1]), 1.0);
        assert_eq!(measure.name(), "custom");
    }
}
