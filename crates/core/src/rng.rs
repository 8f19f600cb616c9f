//! RNG module - piece generation strategies
//!
//! The engine draws kinds through the [`PieceSource`] trait so hosts and tests
//! can inject the sequence:
//!
//! - [`BagRandomizer`]: the "7-bag" algorithm. Each bag holds one of each kind,
//!   shuffled; draw until empty, then refill.
//! - [`UniformRandomizer`]: every draw independently uniform over the seven kinds.
//! - [`ScriptedSource`]: replays a fixed list, cycling.
//!
//! Randomness comes from a small seeded LCG so games are reproducible.

use crate::types::PieceKind;

/// Anything that can hand the engine its next piece kind.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
}

impl BagRandomizer {
    pub fn new(seed: u32) -> Self {
        let mut randomizer = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        randomizer.refill_bag();
        randomizer
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, refilling the bag when it runs out
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces still waiting in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl PieceSource for BagRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        self.draw()
    }
}

/// Independent uniform draws over the seven kinds
#[derive(Debug, Clone)]
pub struct UniformRandomizer {
    rng: SimpleRng,
}

impl UniformRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformRandomizer {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed list of kinds, starting over at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedSource {
    /// An empty list replays `T` forever.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::T);
        }
        Self { kinds, pos: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}

/// Which randomizer a host wants, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    #[default]
    Bag,
    Uniform,
}

impl RandomizerKind {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bag" | "7bag" | "7-bag" => Some(RandomizerKind::Bag),
            "uniform" | "random" => Some(RandomizerKind::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RandomizerKind::Bag => "bag",
            RandomizerKind::Uniform => "uniform",
        }
    }
}

/// The engine's default piece source: any of the built-in strategies.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Bag(BagRandomizer),
    Uniform(UniformRandomizer),
    Scripted(ScriptedSource),
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Bag => Randomizer::Bag(BagRandomizer::new(seed)),
            RandomizerKind::Uniform => Randomizer::Uniform(UniformRandomizer::new(seed)),
        }
    }

    pub fn bag(seed: u32) -> Self {
        Randomizer::Bag(BagRandomizer::new(seed))
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::bag(1)
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> PieceKind {
        match self {
            Randomizer::Bag(r) => r.next_kind(),
            Randomizer::Uniform(r) => r.next_kind(),
            Randomizer::Scripted(r) => r.next_kind(),
        }
    }
}

impl From<ScriptedSource> for Randomizer {
    fn from(value: ScriptedSource) -> Self {
        Randomizer::Scripted(value)
    }
}
