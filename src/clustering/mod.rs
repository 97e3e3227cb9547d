pub mod assignment;
pub mod cluster;
pub mod kmeans;
pub mod prediction;
pub mod update;
pub mod utils;

pub use assignment::{assign, assign_parallel, assign_sequential};
pub use cluster::{Cluster, ClusterSet, ExecutionMode};
pub use kmeans::{run, KMeans, KMeansParams};
pub use prediction::{predict, predict_parallel, predict_sequential};
pub use update::{update, update_parallel, update_sequential};
