use serde::{Deserialize, Serialize};

use crate::cdf::{FIXED_BITS, ORDER, RATE};
use crate::error::{Error, Result};

/// Tunables of the context tree. The fixed-point scale is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of preceding symbols used as context, 0 is an order-0 model
    pub order: usize,
    /// Decay shift, larger adapts slower
    pub rate: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { order: ORDER, rate: RATE }
    }
}

impl ModelConfig {
    pub fn with_order(order: usize) -> Self {
        Self { order, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        validate_rate(self.rate)
    }
}

/// The decay shift has to stay below the fixed-point precision.
pub(crate) fn validate_rate(rate: u32) -> Result<()> {
    if !(1..=FIXED_BITS).contains(&rate) {
        return Err(Error::InvalidRate { rate });
    }
    Ok(())
}

/// Parameters of the genetic token search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub population: usize,
    /// Parents are drawn from the best `elite` genomes
    pub elite: usize,
    /// Hard limit on generations
    pub generations: usize,
    /// Stop as soon as the best fitness drops below this
    pub target: Option<f64>,
    pub seed: u64,
    /// Context order of the fitness estimator
    pub order: usize,
    /// Only the first `corpus_len` bytes of the corpus are segmented
    pub corpus_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population: 100,
            elite: 10,
            generations: 100,
            target: None,
            seed: 1,
            order: ORDER,
            corpus_len: 1024,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(Error::InvalidConfig("population must be positive".into()));
        }
        if self.elite == 0 || self.elite > self.population {
            return Err(Error::InvalidConfig(format!(
                "elite must be in 1..={}, got {}",
                self.population, self.elite
            )));
        }
        if self.generations == 0 {
            return Err(Error::InvalidConfig("generations must be positive".into()));
        }
        if self.corpus_len == 0 {
            return Err(Error::InvalidConfig("corpus_len must be positive".into()));
        }
        Ok(())
    }

    /// Sets the population, shrinking the elite if it no longer fits.
    pub fn with_population(self, population: usize) -> Self {
        Self { population, elite: self.elite.min(population), ..self }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
