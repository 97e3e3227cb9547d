use crate::clustering::cluster::{Cluster, ClusterSet, ExecutionMode};
use crate::clustering::utils::{compute_mean, join_worker};
use crate::core::{KMeansError, KMeansFloat, Result};
use log::{debug, warn};
use ndarray::ArrayView2;
use std::thread;

/// Moves every cluster with assigned points to the mean of those points.
///
/// `data` must be the dataset the assignment sets were built from, since the
/// sets hold its row indices.
pub fn update<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
    mode: ExecutionMode,
) -> Result<()> {
    match mode {
        ExecutionMode::Sequential => update_sequential(data, clusters),
        ExecutionMode::Parallel => update_parallel(data, clusters),
    }
}

pub fn update_sequential<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
) -> Result<()> {
    validate_assignments(data, clusters)?;
    for (idx, cluster) in clusters.clusters_mut().iter_mut().enumerate() {
        update_cluster(idx, cluster, data);
    }
    Ok(())
}

/// One scoped worker per cluster. Each worker owns the `&mut` borrow of its
/// own slot, so no two workers touch the same centroid or assignment set.
pub fn update_parallel<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
) -> Result<()> {
    validate_assignments(data, clusters)?;
    debug!("Updating {} clusters with one worker each", clusters.len());

    thread::scope(|scope| {
        let handles: Vec<_> = clusters
            .clusters_mut()
            .iter_mut()
            .enumerate()
            .map(|(idx, cluster)| scope.spawn(move || update_cluster(idx, cluster, data)))
            .collect();

        handles.into_iter().for_each(join_worker);
    });
    Ok(())
}

// Checked up front so that a bad set fails the step before any centroid moves.
fn validate_assignments<F: KMeansFloat>(data: &ArrayView2<F>, clusters: &ClusterSet<F>) -> Result<()> {
    if data.ncols() != clusters.dim() {
        return Err(KMeansError::DimensionMismatch {
            expected: clusters.dim(),
            actual: data.ncols(),
        });
    }
    let len = data.nrows();
    for cluster in clusters.clusters() {
        if let Some(&index) = cluster.points().iter().find(|&&index| index >= len) {
            return Err(KMeansError::PointOutOfRange { index, len });
        }
    }
    Ok(())
}

fn update_cluster<F: KMeansFloat>(idx: usize, cluster: &mut Cluster<F>, data: &ArrayView2<F>) {
    if cluster.points.is_empty() {
        warn!("Cluster {} received no points, keeping its previous centroid", idx);
        cluster.last_size = Some(0);
        return;
    }

    cluster.centroid = compute_mean(data, &cluster.points);
    cluster.last_size = Some(cluster.points.len());
    cluster.points.clear();
}
