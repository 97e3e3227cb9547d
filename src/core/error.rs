use thiserror::Error;

/// Errors produced by the clustering engine and its configuration layer.
#[derive(Debug, Error)]
pub enum KMeansError {
    /// A point was compared against a point or centroid of another dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// k is zero or disagrees with the number of seeded centroids.
    #[error("invalid k: {0}")]
    InvalidK(String),
    /// An assignment set names a row the dataset does not have.
    #[error("point index {index} out of range for dataset of {len} points")]
    PointOutOfRange { index: usize, len: usize },
    /// A label names a cluster the set does not have.
    #[error("label {label} out of range for {k} clusters")]
    LabelOutOfRange { label: usize, k: usize },
    /// The shared assignment lock was poisoned by a panicking worker.
    #[error("assignment lock poisoned")]
    LockPoisoned,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KMeansError>;
