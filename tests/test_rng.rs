// Tests for RNG reproducibility and distribution, and for the seeded initializer
// built on top of it.

use backprop_lab::utils::{Initializer, SimpleRng};

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn test_same_seed_same_sequence() {
    let mut rng1 = SimpleRng::new(12345);
    let mut rng2 = SimpleRng::new(12345);

    for _ in 0..1000 {
        assert_eq!(rng1.next_u32(), rng2.next_u32());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = SimpleRng::new(1);
    let mut rng2 = SimpleRng::new(2);

    let a: Vec<u32> = (0..10).map(|_| rng1.next_u32()).collect();
    let b: Vec<u32> = (0..10).map(|_| rng2.next_u32()).collect();
    assert_ne!(a, b);
}

#[test]
fn test_cloned_rng_continues_identically() {
    let mut rng = SimpleRng::new(99);
    for _ in 0..17 {
        rng.next_u32();
    }
    let mut copy = rng.clone();
    for _ in 0..100 {
        assert_eq!(rng.next_f64(), copy.next_f64());
    }
}

// ============================================================================
// Distribution
// ============================================================================

#[test]
fn test_next_f64_in_unit_interval() {
    let mut rng = SimpleRng::new(7);
    for _ in 0..10_000 {
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v), "{} outside [0, 1)", v);
    }
}

#[test]
fn test_gen_range_bounds_and_mean() {
    let mut rng = SimpleRng::new(31337);
    let n = 20_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let v = rng.gen_range_f64(-0.5, 0.5);
        assert!((-0.5..0.5).contains(&v));
        sum += v;
    }
    let mean = sum / n as f64;
    assert!(mean.abs() < 0.02, "mean {} far from 0", mean);
}

#[test]
fn test_gen_range_covers_both_halves() {
    let mut rng = SimpleRng::new(5);
    let values: Vec<f64> = (0..200).map(|_| rng.gen_range_f64(-1.0, 1.0)).collect();
    assert!(values.iter().any(|&v| v < 0.0));
    assert!(values.iter().any(|&v| v > 0.0));
}

// ============================================================================
// Initializer
// ============================================================================

#[test]
fn test_seeded_initializer_is_reproducible() {
    let mut a = Initializer::seeded(42);
    let mut b = Initializer::seeded(42);
    assert_eq!(a.weights(25), b.weights(25));
    assert_eq!(a.bias(), b.bias());
}

#[test]
fn test_seeded_weights_in_range_and_zero_bias() {
    let mut init = Initializer::seeded(8);
    for w in init.weights(500) {
        assert!((-0.5..0.5).contains(&w));
    }
    assert_eq!(init.bias(), 0.0);
}

#[test]
fn test_constant_initializer() {
    let mut init = Initializer::constant(0.25, -0.1);
    assert_eq!(init.weights(3), vec![0.25; 3]);
    assert_eq!(init.bias(), -0.1);
}
