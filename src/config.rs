//! Evaluation settings shared by the workflows in [`crate::evaluate`].

use crate::error::{Error, Result};
use crate::metrics::typical::DEFAULT_MIN_MODE_COUNT;

/// Names and thresholds used when evaluating a labeled dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationConfig {
    /// Attribute holding the cluster label.
    pub cluster_attribute: String,
    /// Name of the attribute written back by the silhouette workflow.
    pub silhouette_attribute: String,
    /// Role of the written-back silhouette attribute.
    pub silhouette_role: String,
    /// Minimum occurrences for a nominal value to be reported as typical.
    pub min_mode_count: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            cluster_attribute: "cluster".to_string(),
            silhouette_attribute: "silhouette".to_string(),
            silhouette_role: "Silhouette".to_string(),
            min_mode_count: DEFAULT_MIN_MODE_COUNT,
        }
    }
}

impl EvaluationConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster label attribute.
    pub fn with_cluster_attribute(mut self, name: impl Into<String>) -> Self {
        self.cluster_attribute = name.into();
        self
    }

    /// Set the name of the written-back silhouette attribute.
    pub fn with_silhouette_attribute(mut self, name: impl Into<String>) -> Self {
        self.silhouette_attribute = name.into();
        self
    }

    /// Set the role of the written-back silhouette attribute.
    pub fn with_silhouette_role(mut self, role: impl Into<String>) -> Self {
        self.silhouette_role = role.into();
        self
    }

    /// Set the minimum mode count for nominal typical values.
    pub fn with_min_mode_count(mut self, count: usize) -> Self {
        self.min_mode_count = count;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cluster_attribute.is_empty() {
            return Err(Error::InvalidParameter {
                name: "cluster_attribute",
                message: "must not be empty",
            });
        }
        if self.silhouette_attribute.is_empty() {
            return Err(Error::InvalidParameter {
                name: "silhouette_attribute",
                message: "must not be empty",
            });
        }
        if self.min_mode_count == 0 {
            return Err(Error::InvalidParameter {
                name: "min_mode_count",
                message: "must be > 0",
            });
        }
        Ok(())
    }
}
