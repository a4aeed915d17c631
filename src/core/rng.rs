//! Seeded random number generation for sessions.
//!
//! Every random decision a session makes (card sampling, special-player
//! selection, secret choice) is drawn from a [`GameRng`] built from a
//! single `u64` seed, so a session can be replayed exactly.
//!
//! ## Streams
//!
//! Card sampling and role assignment use separate context streams. Changing
//! how many cards are drawn never changes who ends up special:
//!
//! ```
//! use party_deck::core::GameRng;
//!
//! let rng = GameRng::new(7);
//! let mut cards = rng.for_context("cards");
//! let mut roles = rng.for_context("roles");
//!
//! let a = cards.sample_indices(10, 3);
//! let b = roles.sample_indices(10, 3);
//! assert_eq!(a.len(), b.len());
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Offset between successive play-again generations.
const FORK_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic RNG backing a session.
///
/// Uses ChaCha8: fast, and seedable from a single `u64`.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the RNG for a follow-up session ("play again").
    ///
    /// Depends only on the seed, so forking the same session twice gives
    /// the same result, and each generation of forks gets a new seed.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self::new(self.seed.wrapping_add(FORK_STEP))
    }

    /// Create an independent stream for one kind of decision.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);

        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Draw `amount` distinct indices from `0..len`, uniformly over all
    /// subsets of that size.
    ///
    /// The returned order is random; sort it if you need a set.
    /// Panics if `amount > len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.inner, len, amount).into_vec()
    }
}
