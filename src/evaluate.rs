//! End-to-end evaluation workflows.
//!
//! [`Evaluator`] wires the pieces together for a labeled [`Dataset`]: it
//! resolves the cluster attribute, partitions the dataset, binds the distance
//! measure and runs one metric. The silhouette write-back is a separate,
//! explicit step ([`write_back_silhouette`]) so that computing a result never
//! mutates the dataset.
//!
//! ```rust
//! use cluster_validity::dataset::{Attribute, Dataset, Value};
//! use cluster_validity::distance::EuclideanDistance;
//! use cluster_validity::evaluate::Evaluator;
//!
//! let mut data = Dataset::from_rows(
//!     vec![Attribute::numeric("x"), Attribute::nominal("cluster").with_role("cluster")],
//!     vec![
//!         ("1".into(), vec![Value::from(0.0), Value::from("a")]),
//!         ("2".into(), vec![Value::from(1.0), Value::from("a")]),
//!         ("3".into(), vec![Value::from(9.0), Value::from("b")]),
//!     ],
//! )
//! .unwrap();
//!
//! let evaluator = Evaluator::default();
//! let silhouette = evaluator.silhouette(&data, &mut EuclideanDistance::new()).unwrap();
//! evaluator.write_back_silhouette(&mut data, &silhouette).unwrap();
//! assert!(data.attribute("silhouette").is_ok());
//! ```

use crate::config::EvaluationConfig;
use crate::dataset::{Attribute, Dataset, Value};
use crate::distance::DistanceMeasure;
use crate::error::{Error, Result};
use crate::metrics::{DunnIndex, RandIndex, Silhouette, TypicalValues};
use crate::partition::Partition;

/// Runs the validity metrics on labeled datasets.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    /// Create an evaluator; the configuration is validated.
    pub fn new(config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Partition `dataset` by the configured cluster attribute.
    pub fn partition<'a>(&self, dataset: &'a Dataset) -> Result<Partition<'a>> {
        Partition::from_dataset(dataset, &self.config.cluster_attribute)
    }

    /// Typical values of the whole dataset and of every cluster.
    pub fn typical_values(&self, dataset: &Dataset) -> Result<TypicalValues> {
        let partition = self.partition(dataset)?;
        tracing::info!(
            entities = dataset.len(),
            clusters = partition.len(),
            "computing typical values"
        );
        Ok(TypicalValues::compute(
            dataset,
            &partition,
            self.config.min_mode_count,
        ))
    }

    /// Dunn index of the dataset's clustering.
    pub fn dunn_index<M>(&self, dataset: &Dataset, measure: &mut M) -> Result<DunnIndex>
    where
        M: DistanceMeasure + ?Sized,
    {
        let partition = self.partition(dataset)?;
        measure.init(dataset)?;
        tracing::info!(
            measure = measure.name(),
            entities = dataset.len(),
            clusters = partition.len(),
            "computing dunn index"
        );
        let dunn = DunnIndex::compute(&partition, measure)?;
        tracing::info!(value = dunn.value, "dunn index computed");
        Ok(dunn)
    }

    /// Silhouette of the dataset's clustering. The dataset is not modified.
    pub fn silhouette<M>(&self, dataset: &Dataset, measure: &mut M) -> Result<Silhouette>
    where
        M: DistanceMeasure + ?Sized,
    {
        let partition = self.partition(dataset)?;
        measure.init(dataset)?;
        tracing::info!(
            measure = measure.name(),
            entities = dataset.len(),
            clusters = partition.len(),
            "starting silhouette calculation"
        );
        if partition.len() < 2 {
            tracing::warn!(
                clusters = partition.len(),
                "fewer than two clusters, no silhouette coefficients produced"
            );
        }
        let silhouette = Silhouette::compute(&partition, measure);
        tracing::info!(overall = ?silhouette.overall_mean(), "silhouette computed");
        Ok(silhouette)
    }

    /// Rand index between two labelings of the same entities.
    pub fn rand_index(&self, a: &Dataset, b: &Dataset) -> Result<RandIndex> {
        let index = crate::metrics::rand_index(a, b, &self.config.cluster_attribute)?;
        match index {
            RandIndex::Value(value) => tracing::info!(value, "rand index computed"),
            RandIndex::SizeMismatch => {
                tracing::warn!(left = a.len(), right = b.len(), "rand index: datasets differ in size")
            }
            RandIndex::IdentityMismatch => {
                tracing::warn!("rand index: identities do not match or nothing to compare")
            }
        }
        Ok(index)
    }

    /// Write per-entity silhouette coefficients back onto `dataset`.
    ///
    /// See [`write_back_silhouette`].
    pub fn write_back_silhouette(&self, dataset: &mut Dataset, silhouette: &Silhouette) -> Result<()> {
        write_back_silhouette(dataset, silhouette, &self.config)
    }
}

/// Add the silhouette coefficients to `dataset` as a new numeric attribute.
///
/// The attribute is named and tagged per `config`. Coefficients are matched to
/// entities by re-partitioning the dataset: the partition order is the order in
/// which [`Silhouette`] stores them. Entities of clusters without coefficients
/// (the single-cluster case) receive a missing value.
///
/// The caller must hold the dataset exclusively; two write-backs to the same
/// dataset fail on the duplicate attribute name.
pub fn write_back_silhouette(
    dataset: &mut Dataset,
    silhouette: &Silhouette,
    config: &EvaluationConfig,
) -> Result<()> {
    let values = {
        let partition = Partition::from_dataset(dataset, &config.cluster_attribute)?;
        let mut values = vec![Value::Missing; dataset.len()];
        for group in &partition {
            let Some(coefficients) = silhouette.cluster_coefficients(group.label()) else {
                continue;
            };
            if coefficients.len() != group.len() {
                return Err(Error::invalid_dataset(format!(
                    "cluster '{}' has {} entities but {} silhouette coefficients",
                    group.label(),
                    group.len(),
                    coefficients.len()
                )));
            }
            for (&position, &coefficient) in group.positions().iter().zip(coefficients) {
                values[position] = Value::Numeric(coefficient);
            }
        }
        values
    };

    let attribute =
        Attribute::numeric(config.silhouette_attribute.as_str()).with_role(config.silhouette_role.as_str());
    let _ = dataset.add_attribute(attribute, values)?;
    tracing::debug!(
        attribute = %config.silhouette_attribute,
        entities = dataset.len(),
        "silhouette written back"
    );
    Ok(())
}
