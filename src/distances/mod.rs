pub mod distance;

pub use distance::{DistanceMetric, EuclideanDistance};
