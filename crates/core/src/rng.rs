//! RNG module - seeded piece randomizers
//!
//! Everything random in a session is derived from the session seed so that a
//! replay reproduces the exact same piece sequence and garbage holes.
//!
//! Piece generators:
//! - [`UniformGenerator`]: independent uniform draws.
//! - [`BagRandomizer`]: a bag of `7 x levels` pieces, shuffled on creation and
//!   whenever it runs out. Any `7 x levels` consecutive draws aligned to a bag
//!   contain every piece exactly `levels` times.
//! - [`SequenceGenerator`]: a fixed cycle, for scripted scenarios.

use crate::types::PieceKind;

/// 64-bit LCG (Knuth's MMIX constants) returning the high 32 bits of its state.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: i64) -> Self {
        let mut rng = Self { state: seed as u64 };
        // Decorrelate small neighbouring seeds.
        rng.next_u32();
        rng
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        assert!(max > 0, "next_range needs a non-empty range");
        self.next_u32() % max
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Source of the next piece identity.
pub trait PieceGenerator {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform random pieces.
#[derive(Debug, Clone)]
pub struct UniformGenerator {
    rng: SimpleRng,
}

impl UniformGenerator {
    pub fn new(seed: i64) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceGenerator for UniformGenerator {
    fn next_piece(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Shuffled bag holding every piece `levels` times.
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    bag: Vec<PieceKind>,
    cursor: usize,
    rng: SimpleRng,
}

impl BagRandomizer {
    pub fn new(seed: i64, levels: usize) -> Self {
        assert!(levels > 0, "bag needs at least one copy of each piece");
        let bag = PieceKind::ALL
            .iter()
            .flat_map(|&k| std::iter::repeat(k).take(levels))
            .collect();
        let mut out = Self {
            bag,
            cursor: 0,
            rng: SimpleRng::new(seed),
        };
        out.rng.shuffle(&mut out.bag);
        out
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    /// Pieces left before the next reshuffle.
    #[cfg(test)]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }
}

impl PieceGenerator for BagRandomizer {
    fn next_piece(&mut self) -> PieceKind {
        if self.cursor >= self.bag.len() {
            self.rng.shuffle(&mut self.bag);
            self.cursor = 0;
        }
        let piece = self.bag[self.cursor];
        self.cursor += 1;
        piece
    }
}

/// Cycles through a fixed list. Used for scripted scenarios.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    pieces: Vec<PieceKind>,
    cursor: usize,
}

impl SequenceGenerator {
    pub fn new(pieces: Vec<PieceKind>) -> Self {
        assert!(!pieces.is_empty(), "sequence must not be empty");
        Self { pieces, cursor: 0 }
    }
}

impl PieceGenerator for SequenceGenerator {
    fn next_piece(&mut self) -> PieceKind {
        let piece = self.pieces[self.cursor];
        self.cursor = (self.cursor + 1) % self.pieces.len();
        piece
    }
}

/// The randomizer a field owns.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(UniformGenerator),
    Bag(BagRandomizer),
    Sequence(SequenceGenerator),
}

impl Randomizer {
    /// The default: a single 7-bag.
    pub fn seven_bag(seed: i64) -> Self {
        Randomizer::Bag(BagRandomizer::new(seed, 1))
    }
}

impl PieceGenerator for Randomizer {
    fn next_piece(&mut self) -> PieceKind {
        match self {
            Randomizer::Uniform(g) => g.next_piece(),
            Randomizer::Bag(g) => g.next_piece(),
            Randomizer::Sequence(g) => g.next_piece(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let a: Vec<u32> = (0..4).map(|_| rng1.next_u32()).collect();
        let b: Vec<u32> = (0..4).map(|_| rng2.next_u32()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_and_float_bounds() {
        let mut rng = SimpleRng::new(-7);
        for _ in 0..1000 {
            assert!(rng.next_range(10) < 10);
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = BagRandomizer::new(1, 1);
        assert_eq!(bag.remaining().len(), 7);

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.next_piece()).collect();
        drawn.sort_by_key(|k| k.index());
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_bag_reshuffles_on_exhaustion() {
        let mut bag = BagRandomizer::new(99, 2);
        assert_eq!(bag.bag_len(), 14);
        for _ in 0..14 {
            bag.next_piece();
        }
        assert!(bag.remaining().is_empty());
        bag.next_piece();
        assert_eq!(bag.remaining().len(), 13);
    }

    #[test]
    fn test_sequence_cycles() {
        let mut g = SequenceGenerator::new(vec![PieceKind::I, PieceKind::O]);
        let drawn: Vec<_> = (0..5).map(|_| g.next_piece()).collect();
        assert_eq!(
            drawn,
            vec![PieceKind::I, PieceKind::O, PieceKind::I, PieceKind::O, PieceKind::I]
        );
    }

    #[test]
    fn test_uniform_generator_is_seeded() {
        let mut a = Randomizer::Uniform(UniformGenerator::new(5));
        let mut b = Randomizer::Uniform(UniformGenerator::new(5));
        for _ in 0..50 {
            assert_eq!(a.next_piece(), b.next_piece());
        }
    }
}
