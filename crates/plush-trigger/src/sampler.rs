use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws the trigger consumes.
///
/// Rolls compare `next_unit()` against the current chance; sound selection
/// uses `pick_index`. Implement this to drive the trigger deterministically.
pub trait UniformSampler {
    /// A uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// A uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Sampler backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct RngSampler {
    rng: StdRng,
}

impl RngSampler {
    /// Create a sampler with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl UniformSampler for RngSampler {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays scripted draws and picks.
///
/// Once a script runs out its last value repeats. An empty draw script
/// yields `0.0` and an empty pick script yields index `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSampler {
    draws: VecDeque<f32>,
    picks: VecDeque<usize>,
    last_draw: f32,
    last_pick: usize,
}

impl ScriptedSampler {
    /// Create a sampler that returns `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = f32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Script the indices returned by `pick_index`.
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks = picks.into_iter().collect();
        self
    }

    /// Draws not yet consumed.
    pub fn remaining_draws(&self) -> usize {
        self.draws.len()
    }
}

impl UniformSampler for ScriptedSampler {
    fn next_unit(&mut self) -> f32 {
        if let Some(draw) = self.draws.pop_front() {
            self.last_draw = draw;
        }
        self.last_draw
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if let Some(pick) = self.picks.pop_front() {
            self.last_pick = pick;
        }
        self.last_pick % len.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_sampler_is_deterministic() {
        let mut a = RngSampler::seeded(9);
        let mut b = RngSampler::seeded(9);
        for _ in 0..20 {
            assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
            assert_eq!(a.pick_index(5), b.pick_index(5));
        }
    }

    #[test]
    fn rng_sampler_stays_in_range() {
        let mut s = RngSampler::seeded(1);
        for _ in 0..1000 {
            let u = s.next_unit();
            assert!((0.0..1.0).contains(&u));
            assert!(s.pick_index(3) < 3);
        }
    }

    #[test]
    fn scripted_sampler_repeats_last_value() {
        let mut s = ScriptedSampler::new([0.3, 0.7]).with_picks([2]);
        assert_eq!(s.next_unit(), 0.3);
        assert_eq!(s.next_unit(), 0.7);
        assert_eq!(s.next_unit(), 0.7);
        assert_eq!(s.remaining_draws(), 0);
        assert_eq!(s.pick_index(4), 2);
        assert_eq!(s.pick_index(4), 2);
        // Wraps into range
        assert_eq!(s.pick_index(2), 0);
    }

    #[test]
    fn empty_script_defaults() {
        let mut s = ScriptedSampler::default();
        assert_eq!(s.next_unit(), 0.0);
        assert_eq!(s.pick_index(3), 0);
    }
}
