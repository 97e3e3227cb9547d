//! Benchmark plumbing around the clustering engine: configuration, seeded
//! problem generation and wall-clock timing of both execution modes.

pub mod config;
pub mod data;
pub mod timing;

pub use config::Config;
pub use data::{generate_problem, DataDistribution};
pub use timing::{cluster_once, run_benchmark, RunOutcome, TimingTable, SIZE_SETS};
