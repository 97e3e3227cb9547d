use crate::clustering::assignment::assign;
use crate::clustering::cluster::{ClusterSet, ExecutionMode};
use crate::clustering::prediction::predict;
use crate::clustering::update::update;
use crate::core::{KMeansError, KMeansFloat, Result};
use log::{debug, info};
use ndarray::ArrayView2;

/// Runs `iterations` rounds of assignment followed by update and returns the
/// clusters after the last update. There is no convergence check.
pub fn run<F: KMeansFloat>(
    data: &ArrayView2<F>,
    initial_clusters: ClusterSet<F>,
    iterations: usize,
    mode: ExecutionMode,
) -> Result<ClusterSet<F>> {
    let mut clusters = initial_clusters;
    iterate(data, &mut clusters, iterations, mode)?;
    Ok(clusters)
}

fn iterate<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
    iterations: usize,
    mode: ExecutionMode,
) -> Result<()> {
    info!(
        "Running {} k-means: N={}, D={}, k={}, iterations={}",
        mode,
        data.nrows(),
        data.ncols(),
        clusters.len(),
        iterations
    );
    for iteration in 0..iterations {
        assign(data, clusters, mode)?;
        debug!(
            "Iteration {}: cluster sizes {:?}",
            iteration,
            clusters.assignment_sizes()
        );
        update(data, clusters, mode)?;
    }

    let stale = clusters.stale_clusters();
    if !stale.is_empty() {
        info!("Clusters {:?} ended the run without points", stale);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct KMeansParams {
    pub k: usize,
    pub iterations: usize,
    pub mode: ExecutionMode,
}

pub struct KMeans<'a, F: KMeansFloat> {
    pub clusters: ClusterSet<F>,
    pub data: ArrayView2<'a, F>,
    pub params: KMeansParams,
}

impl<'a, F: KMeansFloat> KMeans<'a, F> {
    /// Checks `k` against the seeded centroids before anything runs.
    pub fn new(
        params: KMeansParams,
        data: ArrayView2<'a, F>,
        initial_clusters: ClusterSet<F>,
    ) -> Result<Self> {
        if params.k == 0 {
            return Err(KMeansError::InvalidK("k must be greater than 0".to_string()));
        }
        if initial_clusters.len() != params.k {
            return Err(KMeansError::InvalidK(format!(
                "k is {} but {} centroids were seeded",
                params.k,
                initial_clusters.len()
            )));
        }
        Ok(Self {
            clusters: initial_clusters,
            data,
            params,
        })
    }

    pub fn fit(&mut self) -> Result<()> {
        iterate(
            &self.data,
            &mut self.clusters,
            self.params.iterations,
            self.params.mode,
        )
    }

    pub fn predict(&self, points: &ArrayView2<F>) -> Result<Vec<usize>> {
        predict(points, &self.clusters, self.params.mode)
    }

    /// Nearest-centroid label for every training point.
    pub fn labels(&self) -> Result<Vec<usize>> {
        self.predict(&self.data)
    }

    pub fn into_clusters(self) -> ClusterSet<F> {
        self.clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn create_test_data() -> Array2<f64> {
        array![[1.0, 2.0], [1.5, 2.5], [8.0, 8.0], [8.5, 8.5], [4.0, 4.0], [4.5, 4.5]]
    }

    fn params(k: usize, mode: ExecutionMode) -> KMeansParams {
        KMeansParams {
            k,
            iterations: 5,
            mode,
        }
    }

    #[test]
    fn test_run_zero_iterations_returns_initial() {
        let data = create_test_data();
        let initial = ClusterSet::from_centroids(array![[0.0, 0.0], [9.0, 9.0]]).unwrap();

        let clusters = run(&data.view(), initial, 0, ExecutionMode::Parallel).unwrap();

        assert_eq!(clusters.centroids(), array![[0.0, 0.0], [9.0, 9.0]]);
        assert!(clusters.stale_clusters().is_empty());
    }

    #[test]
    fn test_fit() {
        let data = create_test_data();
        let initial = ClusterSet::from_centroids(array![[1.0, 2.0], [8.0, 8.0], [4.0, 4.0]]).unwrap();

        let mut kmeans = KMeans::new(params(3, ExecutionMode::Sequential), data.view(), initial).unwrap();
        kmeans.fit().expect("Clustering failed");

        assert_eq!(kmeans.labels().unwrap(), vec![0, 0, 1, 1, 2, 2]);
        let centroids = kmeans.into_clusters().centroids();
        assert!((centroids[[0, 0]] - 1.25).abs() < 1e-12);
        assert!((centroids[[1, 1]] - 8.25).abs() < 1e-12);
        assert!((centroids[[2, 0]] - 4.25).abs() < 1e-12);
    }

    #[test]
    fn test_new_rejects_zero_k() {
        let data = create_test_data();
        let initial = ClusterSet::from_centroids(array![[0.0, 0.0]]).unwrap();

        let result = KMeans::new(params(0, ExecutionMode::Sequential), data.view(), initial);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_new_rejects_mismatched_k() {
        let data = create_test_data();
        let initial = ClusterSet::from_centroids(array![[0.0, 0.0], [1.0, 1.0]]).unwrap();

        let result = KMeans::new(params(3, ExecutionMode::Parallel), data.view(), initial);
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_run_propagates_dimension_mismatch() {
        let data = create_test_data();
        let initial = ClusterSet::from_centroids(array![[0.0, 0.0, 0.0]]).unwrap();

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let result = run(&data.view(), initial.clone(), 3, mode);
            assert!(matches!(result, Err(KMeansError::DimensionMismatch { .. })), "mode {}", mode);
        }
    }
}
