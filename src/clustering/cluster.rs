use crate::core::{KMeansError, KMeansFloat, Result};
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fmt;

/// Selects whether a step runs on the calling thread or fans out to workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Parallel => write!(f, "parallel"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cluster<F: KMeansFloat> {
    pub(crate) centroid: Array1<F>,
    pub(crate) points: Vec<usize>, // Row indices of the points assigned during the current iteration
    pub(crate) last_size: Option<usize>, // Points consumed by the most recent update, None before the first
}

impl<F: KMeansFloat> Cluster<F> {
    pub fn new(centroid: Array1<F>) -> Self {
        Self {
            centroid,
            points: Vec::new(),
            last_size: None,
        }
    }

    pub fn centroid(&self) -> &Array1<F> {
        &self.centroid
    }

    /// Row indices currently assigned to this cluster.
    pub fn points(&self) -> &[usize] {
        &self.points
    }

    pub fn last_size(&self) -> Option<usize> {
        self.last_size
    }

    /// True when the most recent update found no points for this cluster and
    /// therefore kept the previous centroid.
    pub fn is_stale(&self) -> bool {
        self.last_size == Some(0)
    }
}

/// Exactly `k` clusters sharing one dimension. The set never grows or shrinks
/// after construction; only centroids and assignment sets change.
#[derive(Debug, Clone)]
pub struct ClusterSet<F: KMeansFloat> {
    clusters: Vec<Cluster<F>>,
    dim: usize,
}

impl<F: KMeansFloat> ClusterSet<F> {
    /// Builds one cluster per row of `centroids`.
    pub fn from_centroids(centroids: Array2<F>) -> Result<Self> {
        if centroids.nrows() == 0 {
            return Err(KMeansError::InvalidK(
                "at least one centroid must be seeded".to_string(),
            ));
        }
        let dim = centroids.ncols();
        let clusters = centroids
            .outer_iter()
            .map(|row| Cluster::new(row.to_owned()))
            .collect();
        Ok(Self { clusters, dim })
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn clusters(&self) -> &[Cluster<F>] {
        &self.clusters
    }

    pub fn get(&self, index: usize) -> Option<&Cluster<F>> {
        self.clusters.get(index)
    }

    /// Slot access for the update step. A slice cannot be resized, so the
    /// slot count stays fixed while workers hold their borrows.
    pub(crate) fn clusters_mut(&mut self) -> &mut [Cluster<F>] {
        &mut self.clusters
    }

    /// Owned copy of every centroid, one per row.
    pub fn centroids(&self) -> Array2<F> {
        Array2::from_shape_fn((self.clusters.len(), self.dim), |(i, j)| {
            self.clusters[i].centroid[j]
        })
    }

    pub fn assignment_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.points.len()).collect()
    }

    /// Indices of clusters whose last update kept a stale centroid.
    pub fn stale_clusters(&self) -> Vec<usize> {
        self.clusters
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_stale())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub(crate) fn replace_assignments(&mut self, sets: Vec<Vec<usize>>) {
        debug_assert_eq!(sets.len(), self.clusters.len());
        for (cluster, points) in self.clusters.iter_mut().zip(sets) {
            cluster.points = points;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_centroids() {
        let clusters = ClusterSet::from_centroids(array![[0.0, 0.0], [10.0, 10.0]]).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.dim(), 2);
        assert_eq!(clusters.clusters()[1].centroid(), &array![10.0, 10.0]);
        for cluster in clusters.clusters() {
            assert!(cluster.points().is_empty());
            assert_eq!(cluster.last_size(), None);
            assert!(!cluster.is_stale());
        }
    }

    #[test]
    fn test_from_centroids_rejects_zero_clusters() {
        let result = ClusterSet::<f64>::from_centroids(Array2::zeros((0, 3)));
        assert!(matches!(result, Err(KMeansError::InvalidK(_))));
    }

    #[test]
    fn test_centroids_snapshot_is_detached() {
        let mut clusters = ClusterSet::from_centroids(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let snapshot = clusters.centroids();

        clusters.clusters_mut()[0].centroid = array![9.0, 9.0];

        assert_eq!(snapshot, array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(clusters.centroids(), array![[9.0, 9.0], [3.0, 4.0]]);
    }

    #[test]
    fn test_stale_clusters() {
        let mut clusters =
            ClusterSet::from_centroids(array![[0.0], [1.0], [2.0]]).unwrap();
        clusters.clusters_mut()[0].last_size = Some(4);
        clusters.clusters_mut()[1].last_size = Some(0);

        assert_eq!(clusters.stale_clusters(), vec![1]);
    }

    #[test]
    fn test_execution_mode_from_yaml() {
        let modes: Vec<ExecutionMode> = serde_yaml::from_str("[sequential, parallel]").unwrap();
        assert_eq!(modes, vec![ExecutionMode::Sequential, ExecutionMode::Parallel]);
        assert_eq!(ExecutionMode::Parallel.to_string(), "parallel");
    }
}
