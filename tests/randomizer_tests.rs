//! Piece generator properties.

use std::collections::HashSet;

use termblocks::core::{BagRandomizer, PieceGenerator, SimpleRng, UniformGenerator};
use termblocks::types::PieceKind;

#[test]
fn test_each_bag_window_holds_all_seven() {
    for seed in [0, 1, 42, -7, i64::MAX, 0x5EED] {
        let mut bag = BagRandomizer::new(seed, 1);
        for _ in 0..20 {
            let window: HashSet<PieceKind> = (0..7).map(|_| bag.next_piece()).collect();
            assert_eq!(window.len(), 7, "seed {}", seed);
        }
    }
}

#[test]
fn test_double_bag_counts() {
    let mut bag = BagRandomizer::new(3, 2);
    assert_eq!(bag.bag_len(), 14);
    let mut counts = [0usize; 7];
    for _ in 0..14 {
        counts[bag.next_piece().index()] += 1;
    }
    assert_eq!(counts, [2; 7]);
}

#[test]
fn test_same_seed_same_sequence() {
    let a: Vec<_> = {
        let mut g = BagRandomizer::new(1234, 1);
        (0..50).map(|_| g.next_piece()).collect()
    };
    let b: Vec<_> = {
        let mut g = BagRandomizer::new(1234, 1);
        (0..50).map(|_| g.next_piece()).collect()
    };
    assert_eq!(a, b);

    let mut u1 = UniformGenerator::new(5);
    let mut u2 = UniformGenerator::new(5);
    for _ in 0..50 {
        assert_eq!(u1.next_piece(), u2.next_piece());
    }
}

#[test]
fn test_rng_range_covers_all_values() {
    let mut rng = SimpleRng::new(77);
    let mut seen = [false; 10];
    for _ in 0..1000 {
        seen[rng.next_range(10) as usize] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
