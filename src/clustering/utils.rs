use crate::core::{KMeansFloat, Result};
use crate::distances::DistanceMetric;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use std::num::NonZeroUsize;
use std::ops::Range;
use std::panic;
use std::thread::{self, ScopedJoinHandle};

pub fn compute_mean<F: KMeansFloat>(data: &ArrayView2<F>, indices: &[usize]) -> Array1<F> {
    if indices.is_empty() {
        return Array1::<F>::zeros(data.ncols());
    }
    let selected_data = data.select(Axis(0), indices);
    selected_data
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::<F>::zeros(data.ncols()))
}

/// Index of the closest centroid. Ties go to the lowest index.
pub fn nearest_centroid<'c, F, M, I>(metric: &M, point: &ArrayView1<F>, centroids: I) -> Result<usize>
where
    F: KMeansFloat + 'c,
    M: DistanceMetric<F> + ?Sized,
    I: IntoIterator<Item = ArrayView1<'c, F>>,
{
    let mut best = 0;
    let mut best_dist = F::infinity();
    for (idx, centroid) in centroids.into_iter().enumerate() {
        let dist = metric.compute(point, &centroid)?;
        if dist < best_dist {
            best = idx;
            best_dist = dist;
        }
    }
    Ok(best)
}

/// Splits `0..len` into `workers` contiguous ranges. Every range but the last
/// holds `len / workers` rows; the last one also takes the remainder.
pub fn chunk_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let rows = len / workers;
    let extra = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let mut end = start + rows;
        if worker + 1 == workers {
            end += extra;
        }
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Joins a scoped worker, resuming its panic on the calling thread.
pub(crate) fn join_worker<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload))
}

/// Hardware parallelism, falling back to a single worker when it is unknown.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distances::EuclideanDistance;
    use ndarray::array;

    #[test]
    fn test_compute_mean() {
        let data = array![[1.0f64, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let indices = vec![0, 2]; // Select the first and third rows

        let result = compute_mean(&data.view(), &indices);
        let expected = array![3.0, 4.0]; // Mean of [1.0, 2.0] and [5.0, 6.0]

        assert!((result[0] - expected[0]).abs() < 1e-12, "Expected {}, got {}", expected[0], result[0]);
        assert!((result[1] - expected[1]).abs() < 1e-12, "Expected {}, got {}", expected[1], result[1]);
    }

    #[test]
    fn test_join_worker_returns_result() {
        let value = thread::scope(|scope| join_worker(scope.spawn(|| 41 + 1)));
        assert_eq!(value, 42);
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn test_join_worker_resumes_panic() {
        thread::scope(|scope| {
            let handle = scope.spawn(|| -> usize { panic!("worker failed") });
            join_worker(handle)
        });
    }

    #[test]
    fn test_nearest_centroid_prefers_lowest_index_on_ties() {
        let centroids = array![[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0]];
        let point = array![0.0, 0.0];

        let best = nearest_centroid(&EuclideanDistance, &point.view(), centroids.outer_iter()).unwrap();
        assert_eq!(best, 0);
    }

    #[test]
    fn test_nearest_centroid() {
        let centroids = array![[0.0, 0.0], [10.0, 10.0], [5.0, 5.0]];
        let point = array![6.0, 4.5];

        let best = nearest_centroid(&EuclideanDistance, &point.view(), centroids.outer_iter()).unwrap();
        assert_eq!(best, 2);
    }

    #[test]
    fn test_chunk_ranges_last_chunk_takes_remainder() {
        let ranges = chunk_ranges(10, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_chunk_ranges_more_workers_than_rows() {
        let ranges = chunk_ranges(2, 4);
        assert_eq!(ranges, vec![0..0, 0..0, 0..0, 0..2]);
    }

    #[test]
    fn test_chunk_ranges_cover_every_row_once() {
        for len in [0, 1, 7, 64, 1001] {
            for workers in [1, 2, 3, 8, 13] {
                let covered: Vec<usize> = chunk_ranges(len, workers).into_iter().flatten().collect();
                assert_eq!(covered, (0..len).collect::<Vec<_>>(), "len {} workers {}", len, workers);
            }
        }
    }

    #[test]
    fn test_chunk_ranges_zero_workers_means_one() {
        assert_eq!(chunk_ranges(5, 0), vec![0..5]);
    }
}
