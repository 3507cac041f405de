//! Template Pickers
//!
//! Uniform template selection for the synthetic generator. The random source
//! is injected so tests can replay a fixed sequence.

use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::notifications::traits::TemplatePicker;

/// Uniform picker backed by a seedable RNG
#[derive(Debug)]
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    /// Picker seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Picker with a reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl TemplatePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        debug_assert!(len > 0, "template pool must not be empty");
        self.rng.lock().gen_range(0..len)
    }
}

/// Replays a fixed sequence of indices, wrapping each into range
#[derive(Debug)]
pub struct SequencePicker {
    sequence: Vec<usize>,
    position: AtomicUsize,
}

impl SequencePicker {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            position: AtomicUsize::new(0),
        }
    }

    /// Always picks the same index
    pub fn constant(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl TemplatePicker for SequencePicker {
    fn pick(&self, len: usize) -> usize {
        if self.sequence.is_empty() {
            return 0;
        }
        let step = self.position.fetch_add(1, Ordering::Relaxed);
        self.sequence[step % self.sequence.len()] % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_stays_in_range() {
        let picker = RandomPicker::seeded(7);
        for _ in 0..1000 {
            assert!(picker.pick(3) < 3);
        }
        assert_eq!(picker.pick(1), 0);
    }

    #[test]
    fn test_seeded_pickers_agree() {
        let a = RandomPicker::seeded(42);
        let b = RandomPicker::seeded(42);
        let first: Vec<usize> = (0..32).map(|_| a.pick(3)).collect();
        let second: Vec<usize> = (0..32).map(|_| b.pick(3)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_picker_hits_every_index() {
        let picker = RandomPicker::seeded(1);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[picker.pick(3)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_sequence_picker_replays_and_wraps() {
        let picker = SequencePicker::new(vec![0, 2, 4]);
        assert_eq!(picker.pick(3), 0);
        assert_eq!(picker.pick(3), 2);
        assert_eq!(picker.pick(3), 1); // 4 % 3
        assert_eq!(picker.pick(3), 0);

        let empty = SequencePicker::new(Vec::new());
        assert_eq!(empty.pick(5), 0);
    }
}
