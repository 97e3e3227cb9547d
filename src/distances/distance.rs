use crate::core::{KMeansError, KMeansFloat, Result};
use ndarray::ArrayView1;
use ndarray_stats::errors::MultiInputError;
use ndarray_stats::DeviationExt;

/// Trait defining the interface for distance metrics
pub trait DistanceMetric<F: KMeansFloat>: Send + Sync {
    /// Computes the distance between two points. Fails if the points have different dimensions.
    fn compute(&self, point1: &ArrayView1<F>, point2: &ArrayView1<F>) -> Result<F>;
}

/// [Euclidean Distance](https://en.wikipedia.org/wiki/Euclidean_distance)
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl<F: KMeansFloat> DistanceMetric<F> for EuclideanDistance {
    #[inline]
    fn compute(&self, point1: &ArrayView1<F>, point2: &ArrayView1<F>) -> Result<F> {
        match point1.sq_l2_dist(point2) {
            Ok(squared) => Ok(squared.sqrt()),
            // two zero-dimension points coincide
            Err(MultiInputError::EmptyInput) => Ok(F::zero()),
            Err(MultiInputError::ShapeMismatch(_)) => Err(KMeansError::DimensionMismatch {
                expected: point1.len(),
                actual: point2.len(),
            }),
        }
    }
}
