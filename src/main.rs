use log::info;
use parakmeans::harness::{cluster_once, run_benchmark, Config};
use parakmeans::visualization::{print_cluster_analysis, print_timing_report};

const DEFAULT_CONFIG: &str = "demos/config.yaml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = Config::from_file(&config_path)?;
    config.setup_logging();
    info!("Loaded {}\n{}", config_path, config);

    let tables = run_benchmark(&config)?;
    print_timing_report(&tables);

    // Cluster layout for the smallest size, first mode
    if let (Some(&n), Some(&mode)) = (config.sizes().first(), config.clustering.modes.first()) {
        let outcome = cluster_once(&config, n, mode)?;
        print_cluster_analysis(&outcome.clusters, &outcome.data.view(), &outcome.labels)?;
    }
    Ok(())
}
