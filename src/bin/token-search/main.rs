use std::{collections::BTreeMap, path::PathBuf, time::Instant};

use anyhow::Context;
use cdf16::{helpers, search::Search, SearchConfig};
use clap::Parser;

/// Searches for a token segmentation of a corpus prefix with a genetic algorithm
#[derive(Parser)]
#[command(name = "token-search")]
struct Cli {
    /// JSON file with a search config, flags override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    population: Option<usize>,
    /// Parents are drawn from this many best genomes
    #[arg(long)]
    elite: Option<usize>,
    /// Context order of the fitness model
    #[arg(long)]
    order: Option<usize>,
    /// Bytes of the corpus to segment
    #[arg(long)]
    len: Option<usize>,
    /// Stop once the best fitness is below this
    #[arg(long)]
    target: Option<f64>,
    /// Write a JSON summary of the run here
    #[arg(long)]
    report: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    corpus: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    helpers::init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SearchConfig::from_json(&json)?
        }
        None => SearchConfig::default(),
    };
    config.seed = cli.seed.unwrap_or(config.seed);
    config.generations = cli.generations.unwrap_or(config.generations);
    if let Some(population) = cli.population {
        config = config.with_population(population);
    }
    config.elite = cli.elite.unwrap_or(config.elite);
    config.order = cli.order.unwrap_or(config.order);
    config.corpus_len = cli.len.unwrap_or(config.corpus_len);
    config.target = cli.target.or(config.target);
    tracing::info!(?config, "starting search");

    let buf = std::fs::read(&cli.corpus)
        .with_context(|| format!("reading {}", cli.corpus.display()))?;
    let search = Search::new(&buf, config.clone())?;
    let corpus = search.corpus().to_vec();

    let timer = Instant::now();
    let report = search.run(|generation| {
        println!("{:4} {:.4} {}", generation.index, generation.best, generation.distinct);
        false
    });
    let time = timer.elapsed();

    let groups = report.best.groups(&corpus);
    for (token, bytes) in &groups {
        println!("{} {}", token, String::from_utf8_lossy(bytes));
    }
    println!(
        "[token-search] best: {:.4}, tokens: {}, generations: {}, time: {:?}",
        report.best.fitness().unwrap_or(f64::NAN),
        groups.len(),
        report.history.len(),
        time
    );

    if let Some(path) = &cli.report {
        let groups = groups
            .iter()
            .map(|(&token, bytes)| (token, String::from_utf8_lossy(bytes).into_owned()))
            .collect::<BTreeMap<_, _>>();
        let json = serde_json::json!({
            "config": config,
            "best": report.best.fitness(),
            "history": report.history,
            "groups": groups,
        });
        let json = serde_json::to_string_pretty(&json)?;
        std::fs::write(path, json.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
