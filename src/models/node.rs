use crate::cdf::{self, Cdf, SYMBOLS};

type Children = [Option<Box<Node>>; SYMBOLS];

/// A context in the tree: its distribution plus one slot per possible
/// preceding symbol.
pub struct Node {
    cdf: Cdf,
    // allocated on the first child, most nodes are leaves
    children: Option<Box<Children>>,
}

impl Node {
    pub fn new() -> Self {
        Self { cdf: cdf::uniform(), children: None }
    }

    pub fn cdf(&self) -> &Cdf {
        &self.cdf
    }

    pub fn decay(&mut self, target: &Cdf, rate: u32) {
        cdf::decay(&mut self.cdf, target, rate);
    }

    pub fn child(&self, key: u8) -> Option<&Node> {
        self.children.as_ref()?[usize::from(key)].as_deref()
    }

    pub fn child_or_insert(&mut self, key: u8) -> &mut Node {
        let children = self
            .children
            .get_or_insert_with(|| Box::new(std::array::from_fn(|_| None)));
        children[usize::from(key)].get_or_insert_with(|| Box::new(Node::new()))
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children.iter().flat_map(|c| c.iter().filter_map(|n| n.as_deref()))
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
