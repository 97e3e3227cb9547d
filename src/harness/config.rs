use crate::clustering::ExecutionMode;
use crate::core::{KMeansError, Result};
use crate::harness::data::DataDistribution;
use crate::harness::timing::SIZE_SETS;
use log::{error, LevelFilter};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ClusteringConfig {
    pub k: usize,
    pub iterations: usize,
    pub modes: Vec<ExecutionMode>,
}

#[derive(Debug, Deserialize)]
pub struct DataConfig {
    pub n_features: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub distribution: DataDistribution,
}

#[derive(Debug, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub size_set: Option<usize>, // Index into the preset size sets
    #[serde(default)]
    pub sizes: Option<Vec<usize>>, // Explicit sizes, takes precedence over size_set
    pub trials: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String, // Log level, e.g., "info", "debug", "warn", "error"
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub clustering: ClusteringConfig,
    pub data: DataConfig,
    pub benchmark: BenchmarkConfig,
    pub logging: LoggingConfig,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Clustering:")?;
        writeln!(f, "    K: {}", self.clustering.k)?;
        writeln!(f, "    Iterations: {}", self.clustering.iterations)?;
        let modes: Vec<String> = self.clustering.modes.iter().map(|m| m.to_string()).collect();
        writeln!(f, "    Modes: {}", modes.join(", "))?;
        writeln!(f, "  Data:")?;
        writeln!(f, "    Features: {}", self.data.n_features)?;
        writeln!(f, "    Seed: {}", self.data.seed)?;
        writeln!(f, "    Distribution: {}", self.data.distribution)?;
        writeln!(f, "  Benchmark:")?;
        match &self.benchmark.sizes {
            Some(sizes) => writeln!(f, "    Sizes: {:?}", sizes)?,
            None => writeln!(f, "    Size Set: {:?}", self.benchmark.size_set)?,
        }
        writeln!(f, "    Trials: {}", self.benchmark.trials)?;
        writeln!(f, "  Logging Level: {}", self.logging.level)?;
        Ok(())
    }
}

impl Config {
    /// Reads the YAML configuration file and returns a validated `Config`.
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let file_content = std::fs::read_to_string(file_path)?;
        Self::from_yaml(&file_content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.clustering.k == 0 {
            return Err(KMeansError::InvalidK("k must be greater than 0".to_string()));
        }
        if self.clustering.modes.is_empty() {
            return Err(invalid("at least one execution mode is required"));
        }
        if self.data.n_features == 0 {
            return Err(invalid("n_features must be greater than 0"));
        }
        if self.benchmark.trials == 0 {
            return Err(invalid("trials must be greater than 0"));
        }

        match (&self.benchmark.sizes, self.benchmark.size_set) {
            (Some(sizes), _) if sizes.is_empty() => {
                return Err(invalid("sizes must not be empty"));
            }
            (Some(_), _) => (),
            (None, Some(set)) if set < SIZE_SETS.len() => (),
            (None, Some(set)) => {
                return Err(invalid(&format!(
                    "size_set must be below {}, got {}",
                    SIZE_SETS.len(),
                    set
                )));
            }
            (None, None) => return Err(invalid("either sizes or size_set is required")),
        }

        if self.level_filter().is_none() {
            return Err(invalid(&format!(
                "Unsupported log level: {}",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Dataset sizes to benchmark, in order.
    pub fn sizes(&self) -> Vec<usize> {
        match (&self.benchmark.sizes, self.benchmark.size_set) {
            (Some(sizes), _) => sizes.clone(),
            (None, Some(set)) => SIZE_SETS.get(set).map(|s| s.to_vec()).unwrap_or_default(),
            (None, None) => Vec::new(),
        }
    }

    fn level_filter(&self) -> Option<LevelFilter> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => Some(LevelFilter::Trace),
            "debug" => Some(LevelFilter::Debug),
            "info" => Some(LevelFilter::Info),
            "warn" => Some(LevelFilter::Warn),
            "error" => Some(LevelFilter::Error),
            "off" => Some(LevelFilter::Off),
            _ => None,
        }
    }

    /// Sets up logging based on the logging level in the configuration.
    pub fn setup_logging(&self) {
        let level_filter = self.level_filter().unwrap_or(LevelFilter::Info);

        if let Err(e) = env_logger::Builder::new()
            .filter_level(level_filter)
            .try_init()
        {
            error!("Failed to initialize logger: {}", e);
        }
    }
}

fn invalid(message: &str) -> KMeansError {
    KMeansError::InvalidConfig(message.to_string())
}
