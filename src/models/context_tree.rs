use super::{Model, Node};
use crate::cdf::{Cdf, MixingTable, RATE};
use crate::config::validate_rate;
use crate::context::ContextWindow;
use crate::error::Result;

/// Order-N model: a tree of contexts where a lookup uses the deepest context
/// seen so far and falls back to shorter ones.
pub struct ContextTree {
    root: Node,
    mixin: &'static MixingTable,
    rate: u32,
}

impl ContextTree {
    pub fn new() -> Self {
        Self { root: Node::new(), mixin: MixingTable::shared(), rate: RATE }
    }

    /// Fails unless `rate` is in `1..=FIXED_BITS`.
    pub fn with_rate(rate: u32) -> Result<Self> {
        validate_rate(rate)?;
        Ok(Self { rate, ..Self::new() })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        let mut stack = vec![&self.root];
        let mut count = 0;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

impl Default for ContextTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for ContextTree {
    fn cdf(&self, ctx: &ContextWindow) -> &Cdf {
        let mut node = &self.root;
        for key in ctx.path() {
            match node.child(key) {
                Some(child) => node = child,
                None => break,
            }
        }
        node.cdf()
    }

    fn update(&mut self, symbol: u8, ctx: &mut ContextWindow) {
        let (mixin, rate) = (self.mixin, self.rate);
        let target = mixin.row(symbol);

        let mut node = &mut self.root;
        node.decay(target, rate);
        for key in ctx.path() {
            node = node.child_or_insert(key);
            node.decay(target, rate);
        }

        ctx.push(symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::ContextTree;
    use crate::cdf::{uniform, width, FIXED_BITS};
    use crate::complexity::Estimator;
    use crate::context::ContextWindow;
    use crate::error::Error;
    use crate::models::Model;

    #[test]
    fn rate_out_of_range() {
        for rate in [0, FIXED_BITS + 1, 32, 40] {
            assert!(matches!(ContextTree::with_rate(rate), Err(Error::InvalidRate { .. })));
        }

        let model = ContextTree::with_rate(FIXED_BITS).unwrap();
        let score = Estimator::with_model(model, 2).complexity(b"abc");
        assert!(score.is_finite());
    }

    #[test]
    fn unseen_context_falls_back() {
        let mut model = ContextTree::new();
        let mut ctx = ContextWindow::new(2);
        for &s in b"abab" {
            model.update(s, &mut ctx);
        }

        // [b, z] was never seen, only its prefix [b]
        let mut probe = ContextWindow::new(2);
        probe.push(b'b');
        probe.push(b'z');
        let b = model.root().child(b'b').map(|n| *n.cdf());
        assert!(b.is_some());
        assert_eq!(Some(*model.cdf(&probe)), b);

        // nothing starts with z
        probe.push(b'z');
        assert_eq!(model.cdf(&probe), model.root().cdf());
    }

    #[test]
    fn update_creates_full_path() {
        let mut model = ContextTree::new();
        let mut ctx = ContextWindow::new(2);
        model.update(1, &mut ctx);
        // root, [0], [0, 0]
        assert_eq!(model.node_count(), 3);
        model.update(2, &mut ctx);
        // [0, 1] branches off [0]
        assert_eq!(model.node_count(), 4);

        assert_eq!(ctx.path().collect::<Vec<_>>(), [1, 2]);
        // [1] has no children yet
        assert_eq!(model.cdf(&ctx), model.root().cdf());
        assert_ne!(*model.cdf(&ctx), uniform());
    }

    #[test]
    fn lookup_is_pure() {
        let mut model = ContextTree::new();
        let mut ctx = ContextWindow::new(1);
        for &s in b"mississippi" {
            model.update(s, &mut ctx);
        }
        let first = *model.cdf(&ctx);
        assert_eq!(*model.cdf(&ctx), first);
        assert_eq!(model.node_count(), 1 + 5);
        // after an 'i' came 's', 'p' and end of input
        let mut probe = ContextWindow::new(1);
        probe.push(b'i');
        assert!(width(model.cdf(&probe), b's') > width(model.cdf(&probe), b'm'));
    }
}
