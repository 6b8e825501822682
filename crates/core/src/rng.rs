//! RNG module - uniform random piece generation
//!
//! Every kind is drawn independently and uniformly (no bag), and spawn
//! columns are drawn uniformly from the kind's legal offset range.
//! The generator is a seeded ChaCha stream so a seed fully determines a game.

use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

use crate::pieces::spawn_max_offset;
use crate::types::PieceKind;

/// Seeded source of piece kinds and spawn offsets.
#[derive(Debug, Clone)]
pub struct Randomizer {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Randomizer {
    /// Create a new randomizer with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Seed this randomizer was created (or last reseeded) with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform choice over the seven kinds.
    pub fn random_kind(&mut self) -> PieceKind {
        PieceKind::from_index(self.rng.random_range(0..PieceKind::ALL.len()))
    }

    /// Uniform column offset in `0..=spawn_max_offset(kind)`.
    pub fn spawn_offset(&mut self, kind: PieceKind) -> i8 {
        self.rng.random_range(0..=spawn_max_offset(kind))
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
