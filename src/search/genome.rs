use std::collections::BTreeMap;

use rand::Rng;

use crate::complexity::complexity;
use crate::conv;

/// A segmentation of the corpus: every byte is assigned a token id.
/// Bytes with the same id form one token group.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    tokens: Vec<u64>,
    fitness: Option<f64>,
}

impl Genome {
    pub fn new(tokens: Vec<u64>) -> Self {
        Self { tokens, fitness: None }
    }

    pub fn random(len: usize, rng: &mut impl Rng) -> Self {
        let max = conv!(u64, len);
        Self::new((0..len).map(|_| rng.gen_range(0..max)).collect())
    }

    pub fn tokens(&self) -> &[u64] {
        &self.tokens
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Copy without the score, for offspring.
    pub fn offspring(&self) -> Self {
        Self::new(self.tokens.clone())
    }

    pub fn groups(&self, corpus: &[u8]) -> BTreeMap<u64, Vec<u8>> {
        let mut groups: BTreeMap<u64, Vec<u8>> = BTreeMap::new();
        for (&token, &byte) in self.tokens.iter().zip(corpus) {
            groups.entry(token).or_insert_with(|| Vec::with_capacity(8)).push(byte);
        }
        groups
    }

    pub fn distinct(&self) -> usize {
        self.tokens.iter().collect::<std::collections::BTreeSet<_>>().len()
    }

    /// Lower is better: the complexity of every token group, plus the
    /// complexity of the token id stream scaled by how many ids there are.
    pub fn evaluate(&mut self, corpus: &[u8], order: usize) -> f64 {
        if let Some(fitness) = self.fitness {
            return fitness;
        }

        let groups = self.groups(corpus);
        let mut fitness: f64 = groups.values().map(|g| f64::from(complexity(order, g))).sum();

        let packed: Vec<u8> = self.tokens.iter().flat_map(|t| t.to_le_bytes()).collect();
        let count = groups.len() as f64;
        fitness += count * f64::from(complexity(order, &packed)) / count.log2().max(1.0);

        self.fitness = Some(fitness);
        fitness
    }

    /// Nudges one token id up or down, staying inside `0..len`.
    pub fn mutate(&mut self, rng: &mut impl Rng) {
        let len = self.tokens.len();
        let max = conv!(u64, len) - 1;
        let token = &mut self.tokens[rng.gen_range(0..len)];
        *token = if rng.gen_bool(0.5) {
            (*token + 1).min(max)
        } else {
            token.saturating_sub(1)
        };
        self.fitness = None;
    }

    /// Exchanges one random position of `a` with one of `b`.
    pub fn swap(a: &mut Self, b: &mut Self, rng: &mut impl Rng) {
        let x = rng.gen_range(0..a.tokens.len());
        let y = rng.gen_range(0..b.tokens.len());
        std::mem::swap(&mut a.tokens[x], &mut b.tokens[y]);
        a.fitness = None;
        b.fitness = None;
    }

    /// Copies one random position of `b` into `a`.
    pub fn splice(a: &mut Self, b: &Self, rng: &mut impl Rng) {
        let x = rng.gen_range(0..a.tokens.len());
        let y = rng.gen_range(0..b.tokens.len());
        a.tokens[x] = b.tokens[y];
        a.fitness = None;
    }
}
