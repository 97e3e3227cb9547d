//! parakmeans: fixed-iteration k-means with interchangeable sequential and
//! multi-threaded steps, so the two can be timed against each other.
//!
//! # Modules
//! - `clustering`: assignment, update, prediction and the clustering loop.
//! - `distances`: the Euclidean distance metric.
//! - `harness`: configuration, seeded problem generation and timing.
//! - `visualization`: cluster statistics and timing tables.
pub mod clustering;
pub mod core;
pub mod distances;
pub mod harness;
pub mod visualization;

pub use crate::clustering::{
    assign, predict, run, update, Cluster, ClusterSet, ExecutionMode, KMeans, KMeansParams,
};
pub use crate::core::{KMeansError, KMeansFloat, Result};
