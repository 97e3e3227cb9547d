//! Assignment step: every point joins the cluster of its nearest centroid.
//!
//! Both variants build the new assignment sets in a side buffer and only
//! replace the clusters' sets once every point has been placed, so a failed
//! step leaves the previous assignment in place.

use crate::clustering::cluster::{ClusterSet, ExecutionMode};
use crate::clustering::utils::{available_workers, chunk_ranges, join_worker, nearest_centroid};
use crate::core::{KMeansError, KMeansFloat, Result};
use crate::distances::EuclideanDistance;
use log::debug;
use ndarray::ArrayView2;
use std::ops::Range;
use std::sync::Mutex;
use std::thread;

/// Rebuilds every cluster's assignment set from `data`.
pub fn assign<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
    mode: ExecutionMode,
) -> Result<()> {
    match mode {
        ExecutionMode::Sequential => assign_sequential(data, clusters),
        ExecutionMode::Parallel => assign_parallel(data, clusters, available_workers()),
    }
}

/// Walks the points in dataset order on the calling thread.
pub fn assign_sequential<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
) -> Result<()> {
    let mut sets = vec![Vec::new(); clusters.len()];

    for (idx, point) in data.outer_iter().enumerate() {
        let centroids = clusters.clusters().iter().map(|c| c.centroid().view());
        let target = nearest_centroid(&EuclideanDistance, &point, centroids)?;
        sets[target].push(idx);
    }

    clusters.replace_assignments(sets);
    Ok(())
}

/// Splits the points into `workers` contiguous chunks, one scoped thread each.
///
/// Workers measure against a snapshot of the centroids taken before any of
/// them starts. Appends go through one lock shared by all clusters; only the
/// distance computation runs unlocked. Returns after every worker has joined.
pub fn assign_parallel<F: KMeansFloat>(
    data: &ArrayView2<F>,
    clusters: &mut ClusterSet<F>,
    workers: usize,
) -> Result<()> {
    let snapshot = clusters.centroids();
    let sets = Mutex::new(vec![Vec::new(); clusters.len()]);
    let ranges = chunk_ranges(data.nrows(), workers);
    debug!(
        "Assigning {} points to {} clusters with {} workers",
        data.nrows(),
        clusters.len(),
        ranges.len()
    );

    thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .filter(|range| !range.is_empty())
            .map(|range| {
                let snapshot = snapshot.view();
                let sets = &sets;
                scope.spawn(move || assign_chunk(data, range, snapshot, sets))
            })
            .collect();

        handles.into_iter().try_for_each(join_worker)
    })?;

    let sets = sets.into_inner().map_err(|_| KMeansError::LockPoisoned)?;
    clusters.replace_assignments(sets);
    Ok(())
}

fn assign_chunk<F: KMeansFloat>(
    data: &ArrayView2<F>,
    range: Range<usize>,
    snapshot: ArrayView2<F>,
    sets: &Mutex<Vec<Vec<usize>>>,
) -> Result<()> {
    for idx in range {
        let target = nearest_centroid(&EuclideanDistance, &data.row(idx), snapshot.outer_iter())?;
        sets.lock().map_err(|_| KMeansError::LockPoisoned)?[target].push(idx);
    }
    Ok(())
}
