use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{complexity, Estimator};
use crate::cdf::{FIXED_BITS, SCALE};
use crate::config::ModelConfig;
use crate::error::Error;

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}

#[test]
fn four_zeroes() {
    // the [0, 0] context is updated 4 times, its width for 0 reaches 10 bits
    let score = complexity(2, &[0, 0, 0, 0]);
    assert_eq!(score, 4.0);
}

#[test]
fn ascending_alphabet() {
    // every context is seen once, a single update gives 9 bits of width
    let input = (0..=255).collect::<Vec<u8>>();
    assert_eq!(complexity(2, &input), 5.0);
    // without context the root has seen everything once, which is worse
    assert!(complexity(0, &input) > 10.0);
}

#[test]
fn empty_input() {
    assert!(complexity(2, &[]).is_nan());
    assert!(matches!(Estimator::new(2).try_complexity(&[]), Err(Error::EmptyInput)));
    assert_eq!(Estimator::new(2).try_complexity(&[0; 4]).ok(), Some(4.0));
}

#[test]
fn single_symbol() {
    assert_eq!(complexity(2, &[42]), 5.0);
    assert_eq!(complexity(0, &[42]), 5.0);
}

#[test]
fn repetition_beats_noise() {
    for n in [50, 200, 1000] {
        let repeated = vec![0x61; n];
        let noise = random_bytes(n as u64, n);
        let (r, x) = (complexity(2, &repeated), complexity(2, &noise));
        assert!(r < x, "n = {}: repeated {} vs random {}", n, r, x);
    }
}

#[test]
fn converges_towards_one_bit() {
    // the target width is SCALE - 255, which still needs 13 bits to write
    let score = complexity(2, &[7; 1000]);
    assert!(score > 1.0 && score < 1.1, "{}", score);
}

#[test]
fn deterministic() {
    let input = random_bytes(3, 4096);
    for order in 0..4 {
        let a = complexity(order, &input);
        let b = complexity(order, &input);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn bounded() {
    let max = (FIXED_BITS + 1) as f32;
    for seed in 0..8 {
        let input = random_bytes(seed, 1 + 97 * seed as usize);
        for order in 0..3 {
            let score = complexity(order, &input);
            assert!((0.0..=max).contains(&score));
        }
    }
}

#[test]
fn text_context_helps() {
    let text = b"the quick brown fox jumps over the lazy dog ".repeat(20);
    let order0 = complexity(0, &text);
    let order2 = complexity(2, &text);
    assert!(order2 < order0, "order2 {} vs order0 {}", order2, order0);
    assert!(order2 < 2.0);
}

#[test]
fn persistent_learning() {
    let text = b"abracadabra".repeat(4);
    let mut fresh = Estimator::new(2);
    let first = fresh.complexity(&text);
    // the same model has already learned the text once
    let second = fresh.complexity(&text);
    assert!(second < first);
    assert_eq!(complexity(2, &text), first);
}

#[test]
fn slower_rate_learns_slower() {
    let input = [9; 64];
    let mut fast = Estimator::with_config(ModelConfig { order: 2, rate: 2 }).unwrap();
    let mut slow = Estimator::with_config(ModelConfig { order: 2, rate: 8 }).unwrap();
    assert!(fast.complexity(&input) < slow.complexity(&input));
    assert!(matches!(
        Estimator::with_config(ModelConfig { order: 2, rate: 0 }),
        Err(Error::InvalidRate { rate: 0 })
    ));
}

#[test]
fn trained_tree_keeps_shape() {
    let mut estimator = Estimator::new(3);
    estimator.complexity(&random_bytes(11, 3000));
    let root = estimator.model().root();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let cdf = node.cdf();
        assert_eq!(cdf[0], 0);
        assert_eq!(cdf[256], SCALE);
        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        stack.extend(node.children());
    }
}
