//! Fixed-point cumulative distributions over the byte alphabet.
//!
//! A [`Cdf`] holds 257 boundaries scaled to [`SCALE`]; the mass of symbol `s`
//! is `cdf[s + 1] - cdf[s]`. See
//! <https://fgiesen.wordpress.com/2015/05/26/models-for-adaptive-arithmetic-coding/>

use std::sync::OnceLock;

use crate::conv;

/// Precision of the fixed-point probabilities
pub const FIXED_BITS: u32 = 16 - 3;
pub const SCALE: u16 = 1 << FIXED_BITS;
/// Damping shift of the exponential decay, each update moves 1/32 of the way
pub const RATE: u32 = 5;
pub const SYMBOLS: usize = 256;
/// Default context order
pub const ORDER: usize = 2;

const STEP: u16 = SCALE / SYMBOLS as u16;

pub type Cdf = [u16; SYMBOLS + 1];

/// Every symbol gets the same width, `cdf[i] = 32 * i`.
pub fn uniform() -> Cdf {
    std::array::from_fn(|i| conv!(u16, i) * STEP)
}

/// Probability mass of `symbol` in fixed point.
#[inline(always)]
pub fn width(cdf: &Cdf, symbol: u8) -> u16 {
    let s = usize::from(symbol);
    cdf[s + 1] - cdf[s]
}

/// Number of bits needed to write `x`, zero for zero.
#[inline(always)]
pub fn bit_len(x: u16) -> u32 {
    u16::BITS - x.leading_zeros()
}

/// Moves every interior boundary `1 / 2^rate` of the way towards `target`.
/// The endpoints stay at 0 and `SCALE`.
pub fn decay(cdf: &mut Cdf, target: &Cdf, rate: u32) {
    for (p, &t) in cdf[1..SYMBOLS].iter_mut().zip(&target[1..SYMBOLS]) {
        let (a, b) = (i32::from(*p), i32::from(t));
        // interpolates between a and b, can't leave 0..=SCALE
        let x = a + ((b - a) >> rate);
        debug_assert!((0..=i32::from(SCALE)).contains(&x));
        *p = conv!(u16, x);
    }
}

/// Per symbol targets of the decay: the distribution after seeing `s` with
/// full confidence. Boundaries grow by 1 per index with a single jump of
/// `SCALE - SYMBOLS` right after `s`.
pub struct MixingTable {
    rows: Vec<Cdf>,
}

impl MixingTable {
    pub fn new() -> Self {
        Self { rows: (0..SYMBOLS).map(Self::build_row).collect() }
    }

    /// The table never changes, so all models read the same instance.
    pub fn shared() -> &'static Self {
        static TABLE: OnceLock<MixingTable> = OnceLock::new();
        TABLE.get_or_init(Self::new)
    }

    pub fn row(&self, symbol: u8) -> &Cdf {
        &self.rows[usize::from(symbol)]
    }

    fn build_row(symbol: usize) -> Cdf {
        let jump = SCALE - conv!(u16, SYMBOLS);
        std::array::from_fn(|j| {
            let j16 = conv!(u16, j);
            if j > symbol { j16 + jump } else { j16 }
        })
    }
}

impl Default for MixingTable {
    fn default() -> Self {
        Self::new()
    }
}
