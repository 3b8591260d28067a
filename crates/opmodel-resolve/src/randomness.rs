use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable randomness shared by every resolution in a model build.
///
/// Access is serialised by a single lock so that, for a fixed seed and a fixed order of calls, the
/// picks are reproducible even when the owner is shared between threads.
#[derive(Debug)]
pub struct Randomness {
    seed: u64,
    rng: Mutex<StdRng>,
}

impl Randomness {
    pub const DEFAULT_SEED: u64 = 0;

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `0..len`, or `None` when `len == 0`.
    pub fn next_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.lock().gen_range(0..len))
    }

    pub fn random_member<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.next_index(items.len()).map(|idx| &items[idx])
    }
}

impl Default for Randomness {
    fn default() -> Self {
        Self::seeded(Self::DEFAULT_SEED)
    }
}
