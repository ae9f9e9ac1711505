/// Ring buffer of the last `order` symbols, used as the key into the context tree.
pub struct ContextWindow {
    symbols: Box<[u8]>,
    head: usize,
}

impl ContextWindow {
    pub fn new(order: usize) -> Self {
        Self { symbols: vec![0; order].into_boxed_slice(), head: 0 }
    }

    pub fn order(&self) -> usize {
        self.symbols.len()
    }

    pub fn reset(&mut self) {
        self.symbols.fill(0);
        self.head = 0;
    }

    /// Overwrites the oldest symbol, no-op for order 0.
    pub fn push(&mut self, symbol: u8) {
        let len = self.symbols.len();
        if len > 0 {
            self.symbols[self.head] = symbol;
            self.head = (self.head + 1) % len;
        }
    }

    /// Symbols from the head around the ring, this is the order in which the
    /// tree is walked.
    pub fn path(&self) -> impl Iterator<Item = u8> + '_ {
        let len = self.symbols.len();
        (0..len).map(move |k| self.symbols[(self.head + k) % len])
    }
}
