//! Dice rolls and deterministic dice RNG.
//!
//! ## Roll
//!
//! The usable die values of one turn. A doubles roll expands to four
//! values at construction; values are consumed one at a time (or in pairs
//! for compound moves) as moves are played.
//!
//! ## DiceRng
//!
//! Deterministic, forkable, serializable dice source:
//!
//! - **Deterministic**: same seed produces the same sequence of rolls
//! - **Forkable**: independent branches for independent matches
//! - **Serializable**: O(1) state capture for match snapshots

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Usable die values for the current turn, highest count four (doubles).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    values: SmallVec<[u8; 4]>,
}

impl Roll {
    /// Build a roll from two raw dice. Doubles expand to four usable values.
    ///
    /// ```
    /// use nardgammon::core::Roll;
    ///
    /// assert_eq!(Roll::new(6, 3).values(), &[6, 3]);
    /// assert_eq!(Roll::new(4, 4).values(), &[4, 4, 4, 4]);
    /// ```
    #[must_use]
    pub fn new(d1: u8, d2: u8) -> Self {
        debug_assert!((1..=6).contains(&d1) && (1..=6).contains(&d2));
        let values = if d1 == d2 {
            SmallVec::from_slice(&[d1; 4])
        } else {
            SmallVec::from_slice(&[d1, d2])
        };
        Self { values }
    }

    /// Build a roll from already-expanded values (snapshot restore, tests).
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
        }
    }

    /// An exhausted roll.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Remaining die values, in consumption order.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct die values, order preserving.
    #[must_use]
    pub fn distinct_values(&self) -> SmallVec<[u8; 2]> {
        let mut out: SmallVec<[u8; 2]> = SmallVec::new();
        for &v in &self.values {
            if !out.contains(&v) {
                out.push(v);
            }
        }
        out
    }

    /// The two die values if exactly two remain and they differ.
    ///
    /// This is the only shape a compound move can be built from: doubles
    /// never qualify, nor does a partially consumed roll.
    #[must_use]
    pub fn distinct_pair(&self) -> Option<(u8, u8)> {
        match self.values.as_slice() {
            &[a, b] if a != b => Some((a, b)),
            _ => None,
        }
    }

    /// Remove the first occurrence of `die`, by value not index.
    ///
    /// Returns false (roll unchanged) if the value is not present.
    pub fn consume(&mut self, die: u8) -> bool {
        if let Some(pos) = self.values.iter().position(|&v| v == die) {
            self.values.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove both values of a compound move.
    pub fn consume_pair(&mut self, d1: u8, d2: u8) -> bool {
        if self.consume(d1) {
            if self.consume(d2) {
                return true;
            }
            // Put the first value back rather than half-consume.
            self.values.push(d1);
        }
        false
    }
}

/// Deterministic dice source with forking for independent matches.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness. The
/// word-position state makes snapshots O(1) regardless of how many rolls
/// have been drawn.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DiceRng {
    /// Create a new dice RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence. The
    /// session manager forks one branch per match from its own RNG.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Roll one die, uniform in 1..=6.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Roll two dice and expand doubles into four usable values.
    pub fn roll(&mut self) -> Roll {
        let d1 = self.roll_die();
        let d2 = self.roll_die();
        Roll::new(d1, d2)
    }

    /// Capture the current state for serialization.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable dice RNG state for match checkpointing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_expansion() {
        assert_eq!(Roll::new(6, 3).values(), &[6, 3]);
        assert_eq!(Roll::new(5, 5).values(), &[5, 5, 5, 5]);
    }

    #[test]
    fn test_consume_by_value() {
        let mut roll = Roll::new(6, 3);
        assert!(roll.consume(3));
        assert_eq!(roll.values(), &[6]);
        assert!(!roll.consume(3));
        assert!(roll.consume(6));
        assert!(roll.is_empty());
    }

    #[test]
    fn test_consume_pair() {
        let mut roll = Roll::new(6, 3);
        assert!(roll.consume_pair(3, 6));
        assert!(roll.is_empty());

        let mut partial = Roll::from_values(&[6]);
        assert!(!partial.consume_pair(6, 3));
        assert_eq!(partial.values(), &[6], "failed pair consume must not eat a die");
    }

    #[test]
    fn test_distinct_pair() {
        assert_eq!(Roll::new(6, 3).distinct_pair(), Some((6, 3)));
        assert_eq!(Roll::new(4, 4).distinct_pair(), None);
        assert_eq!(Roll::from_values(&[5]).distinct_pair(), None);
        assert_eq!(Roll::from_values(&[4, 4]).distinct_pair(), None);
    }

    #[test]
    fn test_distinct_values() {
        assert_eq!(Roll::new(5, 5).distinct_values().as_slice(), &[5]);
        assert_eq!(Roll::new(2, 6).distinct_values().as_slice(), &[2, 6]);
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        for _ in 0..50 {
            assert_eq!(rng1.roll(), rng2.roll());
        }
    }

    #[test]
    fn test_die_range() {
        let mut rng = DiceRng::new(7);
        for _ in 0..200 {
            let d = rng.roll_die();
            assert!((1..=6).contains(&d));
        }
    }

    #[test]
    fn test_roll_shape() {
        let mut rng = DiceRng::new(11);
        for _ in 0..100 {
            let roll = rng.roll();
            match roll.len() {
                2 => assert_ne!(roll.values()[0], roll.values()[1]),
                4 => assert!(roll.values().iter().all(|&v| v == roll.values()[0])),
                n => panic!("unexpected roll length {n}"),
            }
        }
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = DiceRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.roll_die()).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.roll_die()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        assert_eq!(rng1.fork().seed, rng2.fork().seed);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut rng = DiceRng::new(42);
        for _ in 0..100 {
            rng.roll();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll()).collect();

        let mut restored = DiceRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll()).collect();

        assert_eq!(expected, actual);
    }
}
