pub mod context_tree;
pub mod node;

pub use self::{context_tree::*, node::*};

use crate::cdf::Cdf;
use crate::context::ContextWindow;

pub trait Model {
    /// Distribution of the next symbol in context `ctx`.
    fn cdf(&self, ctx: &ContextWindow) -> &Cdf;
    /// Learns `symbol` in context `ctx`, then pushes it into `ctx`.
    fn update(&mut self, symbol: u8, ctx: &mut ContextWindow);
}
