use crate::clustering::cluster::{ClusterSet, ExecutionMode};
use crate::clustering::utils::{available_workers, chunk_ranges, nearest_centroid};
use crate::core::{KMeansFloat, Result};
use crate::distances::EuclideanDistance;
use ndarray::ArrayView2;
use rayon::prelude::*;

/// Labels every row of `points` with the index of its nearest centroid.
/// Assignment sets are ignored and nothing is mutated.
pub fn predict<F: KMeansFloat>(
    points: &ArrayView2<F>,
    clusters: &ClusterSet<F>,
    mode: ExecutionMode,
) -> Result<Vec<usize>> {
    match mode {
        ExecutionMode::Sequential => predict_sequential(points, clusters),
        ExecutionMode::Parallel => predict_parallel(points, clusters, available_workers()),
    }
}

pub fn predict_sequential<F: KMeansFloat>(
    points: &ArrayView2<F>,
    clusters: &ClusterSet<F>,
) -> Result<Vec<usize>> {
    let centroids = clusters.centroids();
    points
        .outer_iter()
        .map(|point| nearest_centroid(&EuclideanDistance, &point, centroids.outer_iter()))
        .collect()
}

/// Same chunking as the parallel assignment step. `workers` sets the chunk
/// count; the chunks run on rayon's global pool rather than per-call threads,
/// since prediction is read-only and sits outside the clustering loop. No lock
/// is taken and labels come back in input order.
pub fn predict_parallel<F: KMeansFloat>(
    points: &ArrayView2<F>,
    clusters: &ClusterSet<F>,
    workers: usize,
) -> Result<Vec<usize>> {
    let centroids = clusters.centroids();
    let chunks = chunk_ranges(points.nrows(), workers)
        .into_par_iter()
        .map(|range| {
            range
                .map(|idx| nearest_centroid(&EuclideanDistance, &points.row(idx), centroids.outer_iter()))
                .collect::<Result<Vec<usize>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(chunks.concat())
}
