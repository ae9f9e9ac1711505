#[cfg(test)]
mod tests;

use tracing::trace;

use crate::cdf::{self, FIXED_BITS};
use crate::config::ModelConfig;
use crate::context::ContextWindow;
use crate::error::{Error, Result};
use crate::models::{ContextTree, Model};

/// Entropy based complexity of a byte sequence.
///
/// The model is trained on the whole input first, then the input is walked
/// again and the bits the trained model would spend on every symbol are
/// averaged. Repetitive inputs score low, inputs the model can't predict
/// score high.
///
/// The model lives as long as the estimator: calling [`Estimator::complexity`]
/// again keeps learning on top of what was seen before. Use a fresh estimator
/// (or [`complexity`]) per input for independent scores.
pub struct Estimator<M: Model = ContextTree> {
    model: M,
    order: usize,
}

impl Estimator {
    pub fn new(order: usize) -> Self {
        Self::with_model(ContextTree::new(), order)
    }

    pub fn with_config(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_model(ContextTree::with_rate(config.rate)?, config.order))
    }
}

impl<M: Model> Estimator<M> {
    pub fn with_model(model: M, order: usize) -> Self {
        Self { model, order }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// `FIXED_BITS + 1` minus the average bit length of the mass the trained
    /// model gives each symbol. Empty input is NaN, see
    /// [`Estimator::try_complexity`].
    pub fn complexity(&mut self, input: &[u8]) -> f32 {
        let mut ctx = ContextWindow::new(self.order);
        for &symbol in input {
            self.model.update(symbol, &mut ctx);
        }
        ctx.reset();

        let mut total: u64 = 0;
        for &symbol in input {
            let width = cdf::width(self.model.cdf(&ctx), symbol);
            total += u64::from(cdf::bit_len(width));
            ctx.push(symbol);
        }

        let score = (FIXED_BITS + 1) as f32 - total as f32 / input.len() as f32;
        trace!(len = input.len(), order = ctx.order(), total, score, "complexity");
        score
    }

    pub fn try_complexity(&mut self, input: &[u8]) -> Result<f32> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(self.complexity(input))
    }
}

/// Complexity of `input` under a fresh order-`order` model.
pub fn complexity(order: usize, input: &[u8]) -> f32 {
    Estimator::new(order).complexity(input)
}
