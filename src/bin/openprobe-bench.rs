use clap::Parser;
use openprobe::benchmark::BenchmarkSession;
use openprobe::config::{BenchmarkConfig, Config};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "openprobe-bench",
    about = "Compare linear, quadratic and double hashing on synthetic workloads",
    version
)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Key counts to measure
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,
    /// Target load factors
    #[arg(long = "load-factors", value_delimiter = ',')]
    load_factors: Option<Vec<f64>>,
    /// Fraction of searches for absent keys
    #[arg(long = "miss-rate")]
    miss_rate: Option<f64>,
    /// Repetitions per measurement
    #[arg(long)]
    runs: Option<usize>,
    /// Workload seed
    #[arg(long)]
    seed: Option<u64>,
    /// Output directory for CSV files
    #[arg(long = "csv-dir")]
    csv_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> openprobe::Result<BenchmarkConfig> {
        let mut config = match &self.config {
            Some(path) => BenchmarkConfig::load_from_file(path)?,
            None => BenchmarkConfig::from_env()?,
        };
        if let Some(sizes) = self.sizes {
            config.test_sizes = sizes;
        }
        if let Some(load_factors) = self.load_factors {
            config.load_factors = load_factors;
        }
        if let Some(miss_rate) = self.miss_rate {
            config.miss_rate = miss_rate;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(csv_dir) = self.csv_dir {
            config.csv_dir = csv_dir;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> openprobe::Result<()> {
    openprobe::init();
    let config = Cli::parse().into_config()?;
    log::info!("benchmark configuration: {:?}", config);

    let mut session = BenchmarkSession::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let measurements = session.run(&mut out)?;
    writeln!(
        out,
        "{} measurements written to {}",
        measurements.len(),
        session.config().csv_dir.display()
    )?;
    Ok(())
}
