//! Genetic search for a token segmentation of a corpus, with the complexity
//! estimate as fitness.

pub mod genome;

pub use genome::Genome;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::{Error, Result};

/// Summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Generation {
    pub index: usize,
    pub best: f64,
    pub distinct: usize,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best: Genome,
    pub history: Vec<Generation>,
}

pub struct Search<'a> {
    corpus: &'a [u8],
    config: SearchConfig,
    rng: ChaCha8Rng,
    genomes: Vec<Genome>,
}

impl<'a> Search<'a> {
    /// Segments the first `config.corpus_len` bytes of `corpus`.
    pub fn new(corpus: &'a [u8], config: SearchConfig) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let corpus = &corpus[..corpus.len().min(config.corpus_len)];

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let genomes = (0..config.population)
            .map(|_| Genome::random(corpus.len(), &mut rng))
            .collect();

        Ok(Self { corpus, config, rng, genomes })
    }

    pub fn corpus(&self) -> &[u8] {
        self.corpus
    }

    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Scores every genome in parallel, keeps the best `population`.
    pub fn select(&mut self, index: usize) -> Generation {
        let (corpus, order) = (self.corpus, self.config.order);
        self.genomes.par_iter_mut().for_each(|genome| {
            genome.evaluate(corpus, order);
        });

        let score = |g: &Genome| g.fitness().unwrap_or(f64::INFINITY);
        self.genomes.sort_by(|a, b| score(a).total_cmp(&score(b)));
        self.genomes.truncate(self.config.population);

        let best = &self.genomes[0];
        Generation { index, best: score(best), distinct: best.distinct() }
    }

    /// Appends `population` offspring of the elite.
    pub fn breed(&mut self) {
        let elite = self.config.elite.min(self.genomes.len());
        let rng = &mut self.rng;
        let mut offspring = Vec::with_capacity(self.config.population + 1);

        while offspring.len() < self.config.population {
            match rng.gen_range(0..3) {
                0 => {
                    let mut child = self.genomes[rng.gen_range(0..elite)].offspring();
                    child.mutate(rng);
                    offspring.push(child);
                }
                1 => {
                    let mut a = self.genomes[rng.gen_range(0..elite)].offspring();
                    let mut b = self.genomes[rng.gen_range(0..elite)].offspring();
                    Genome::swap(&mut a, &mut b, rng);
                    offspring.extend([a, b]);
                }
                _ => {
                    let mut a = self.genomes[rng.gen_range(0..elite)].offspring();
                    let b = self.genomes[rng.gen_range(0..elite)].offspring();
                    Genome::splice(&mut a, &b, rng);
                    offspring.extend([a, b]);
                }
            }
        }

        self.genomes.append(&mut offspring);
    }

    /// Runs until the generation limit, the target fitness, or `stop` says so.
    pub fn run(mut self, mut stop: impl FnMut(&Generation) -> bool) -> SearchReport {
        let mut history = Vec::new();
        let mut index = 0;
        loop {
            let generation = self.select(index);
            debug!(index, best = generation.best, distinct = generation.distinct, "generation");
            history.push(generation);
            index += 1;

            let reached = self.config.target.is_some_and(|t| generation.best < t);
            if reached || index >= self.config.generations || stop(&generation) {
                break;
            }
            self.breed();
        }

        info!(generations = history.len(), best = ?history.last().map(|g| g.best), "search done");
        let best = self.genomes.swap_remove(0);
        SearchReport { best, history }
    }
}
