use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-session random source. Seeded sessions replay identical AI choices.
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        items.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(42);
        let mut b = SessionRng::new(42);
        let items = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        for _ in 0..20 {
            assert_eq!(a.choose(&items), b.choose(&items));
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let mut rng = SessionRng::new(1);
        let items: [usize; 0] = [];
        assert_eq!(rng.choose(&items), None);
    }

    #[test]
    fn test_choose_reaches_every_item() {
        let mut rng = SessionRng::new(7);
        let items = [0, 2, 6, 8];
        let mut seen = [false; 4];
        for _ in 0..200 {
            let picked = rng.choose(&items).unwrap();
            let slot = items.iter().position(|&item| item == picked).unwrap();
            seen[slot] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn test_choose_stays_in_slice() {
        let mut rng = SessionRng::from_random();
        let items = [0, 2, 6, 8];
        for _ in 0..50 {
            let picked = rng.choose(&items).unwrap();
            assert!(items.contains(&picked));
        }
    }
}
