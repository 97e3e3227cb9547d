use crate::clustering::{ClusterSet, ExecutionMode, KMeans, KMeansParams};
use crate::core::Result;
use crate::harness::config::Config;
use crate::harness::data::generate_problem;
use log::info;
use ndarray::Array2;
use std::time::{Duration, Instant};

/// Preset dataset sizes, selected by `benchmark.size_set`.
pub const SIZE_SETS: [[usize; 10]; 7] = [
    [10, 20, 30, 40, 50, 60, 70, 80, 90, 100],
    [100, 125, 150, 175, 200, 225, 250, 275, 300, 325],
    [100, 200, 300, 400, 500, 600, 700, 800, 900, 1000],
    [1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000],
    [10000, 20000, 30000, 40000, 50000, 60000, 70000, 80000, 90000, 100000],
    [100000, 200000, 300000, 400000, 500000, 600000, 700000, 800000, 900000, 1000000],
    [1000000, 2000000, 3000000, 4000000, 5000000, 6000000, 7000000, 8000000, 9000000, 10000000],
];

/// Everything one timed clustering run produced.
pub struct RunOutcome {
    pub data: Array2<f64>,
    pub clusters: ClusterSet<f64>,
    pub labels: Vec<usize>,
    pub elapsed: Duration,
}

/// Wall-clock seconds for every trial and size of one execution mode.
#[derive(Debug, Clone)]
pub struct TimingTable {
    pub mode: ExecutionMode,
    pub sizes: Vec<usize>,
    pub times: Vec<Vec<f64>>, // times[trial][size index]
}

impl TimingTable {
    /// Mean over trials, one entry per size.
    pub fn mean_times(&self) -> Vec<f64> {
        if self.times.is_empty() {
            return vec![0.0; self.sizes.len()];
        }
        (0..self.sizes.len())
            .map(|col| {
                self.times.iter().map(|row| row[col]).sum::<f64>() / self.times.len() as f64
            })
            .collect()
    }
}

/// Generates a fresh problem of `n_samples` points and times clustering plus
/// labelling. Generation is not part of the measured time.
pub fn cluster_once(config: &Config, n_samples: usize, mode: ExecutionMode) -> Result<RunOutcome> {
    let (data, initial) = generate_problem(
        n_samples,
        config.data.n_features,
        config.clustering.k,
        config.data.distribution,
        config.data.seed,
    )?;
    let params = KMeansParams {
        k: config.clustering.k,
        iterations: config.clustering.iterations,
        mode,
    };

    let start = Instant::now();
    let mut kmeans = KMeans::new(params, data.view(), initial)?;
    kmeans.fit()?;
    let labels = kmeans.labels()?;
    let elapsed = start.elapsed();

    let clusters = kmeans.into_clusters();
    Ok(RunOutcome {
        data,
        clusters,
        labels,
        elapsed,
    })
}

/// Times every configured mode over every trial and size.
pub fn run_benchmark(config: &Config) -> Result<Vec<TimingTable>> {
    let sizes = config.sizes();
    let mut tables = Vec::with_capacity(config.clustering.modes.len());

    for &mode in &config.clustering.modes {
        let mut times = Vec::with_capacity(config.benchmark.trials);
        for trial in 0..config.benchmark.trials {
            info!("Mode {}, trial number {}", mode, trial);
            let mut row = Vec::with_capacity(sizes.len());
            for &n in &sizes {
                let outcome = cluster_once(config, n, mode)?;
                info!("Input size N = {} took {:.7}s", n, outcome.elapsed.as_secs_f64());
                row.push(outcome.elapsed.as_secs_f64());
            }
            times.push(row);
        }
        tables.push(TimingTable {
            mode,
            sizes: sizes.clone(),
            times,
        });
    }
    Ok(tables)
}
