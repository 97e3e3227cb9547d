use crate::clustering::ClusterSet;
use crate::core::Result;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::Deserialize;
use std::fmt;

/// How benchmark points are drawn. Centroids are always uniform in [-2, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataDistribution {
    #[default]
    Uniform,
    Normal,
}

impl fmt::Display for DataDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataDistribution::Uniform => write!(f, "uniform"),
            DataDistribution::Normal => write!(f, "normal"),
        }
    }
}

/// Draws `n_samples` points and `k` seed centroids from one seeded stream,
/// points first.
pub fn generate_problem(
    n_samples: usize,
    n_features: usize,
    k: usize,
    distribution: DataDistribution,
    seed: u64,
) -> Result<(Array2<f64>, ClusterSet<f64>)> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let points = match distribution {
        DataDistribution::Uniform => {
            Array2::from_shape_fn((n_samples, n_features), |_| rng.random::<f64>())
        }
        DataDistribution::Normal => Array2::from_shape_fn((n_samples, n_features), |_| {
            StandardNormal.sample(&mut rng)
        }),
    };
    let centroids = Array2::from_shape_fn((k, n_features), |_| rng.random_range(-2.0..2.0));

    Ok((points, ClusterSet::from_centroids(centroids)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_problem_shapes() {
        let (points, clusters) = generate_problem(100, 3, 5, DataDistribution::Uniform, 0).unwrap();

        assert_eq!(points.dim(), (100, 3));
        assert_eq!(clusters.len(), 5);
        assert_eq!(clusters.dim(), 3);
        assert!(points.iter().all(|&x| (0.0..1.0).contains(&x)));
        assert!(clusters.centroids().iter().all(|&x| (-2.0..2.0).contains(&x)));
    }

    #[test]
    fn test_generate_problem_is_seeded() {
        let (a, ca) = generate_problem(50, 2, 3, DataDistribution::Normal, 7).unwrap();
        let (b, cb) = generate_problem(50, 2, 3, DataDistribution::Normal, 7).unwrap();
        let (c, _) = generate_problem(50, 2, 3, DataDistribution::Normal, 8).unwrap();

        assert_eq!(a, b);
        assert_eq!(ca.centroids(), cb.centroids());
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_problem_rejects_zero_k() {
        assert!(generate_problem(10, 2, 0, DataDistribution::Uniform, 0).is_err());
    }
}
