use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use cdf16::{helpers, Estimator, ModelConfig};
use clap::Parser;

/// Prints the complexity of each file under an adaptive order-N model
#[derive(Parser)]
#[command(name = "cdf16")]
struct Cli {
    /// Context order
    #[arg(long, default_value_t = cdf16::cdf::ORDER)]
    order: usize,
    /// Decay rate of the statistics
    #[arg(long, default_value_t = cdf16::cdf::RATE)]
    rate: u32,
    /// Use a new model per file instead of learning across files
    #[arg(long)]
    fresh: bool,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    helpers::init_logging(cli.verbose);

    let config = ModelConfig { rate: cli.rate, ..ModelConfig::with_order(cli.order) };
    let mut estimator = Estimator::with_config(config)?;

    for path in &cli.files {
        let buf = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        if cli.fresh {
            estimator = Estimator::with_config(config)?;
        }

        let timer = Instant::now();
        let score = match estimator.try_complexity(&buf) {
            Ok(score) => score,
            Err(err) => {
                tracing::warn!(path = %path.display(), "{}", err);
                continue;
            }
        };

        println!(
            "[order{}] {}: complexity: {:.4} (order0 entropy: {:.4}), size: {}, ctime: {:?}",
            cli.order,
            path.display(),
            score,
            helpers::entropy(&buf),
            buf.len(),
            timer.elapsed()
        );
    }

    Ok(())
}
