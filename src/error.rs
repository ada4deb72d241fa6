use thiserror::Error;

/// Result alias for `cluster-validity`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by dataset access, distance binding and the validity metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required attribute (usually the cluster label) is not part of the schema.
    #[error("attribute '{name}' does not exist")]
    MissingAttribute {
        /// Attribute that was looked up.
        name: String,
    },

    /// The partition has fewer clusters than the metric needs.
    #[error("metric requires at least {required} clusters, found {found}")]
    InsufficientClusters {
        /// Minimum number of clusters.
        required: usize,
        /// Number of clusters in the partition.
        found: usize,
    },

    /// The dataset could not be built or modified.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// A distance measure cannot be bound to the dataset schema.
    #[error("measure '{measure}' cannot be used: {reason}")]
    IncompatibleMeasure {
        /// Measure name.
        measure: &'static str,
        /// Why binding failed.
        reason: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl Error {
    /// Create a `MissingAttribute` error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute { name: name.into() }
    }

    /// Create an `InvalidDataset` error.
    pub fn invalid_dataset(message: impl Into<String>) -> Self {
        Self::InvalidDataset(message.into())
    }
}
