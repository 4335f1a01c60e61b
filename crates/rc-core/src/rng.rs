//! Deterministic random sources for the stochastic parts of the AI.
//!
//! # Determinism strategy
//!
//! Every stochastic gate (overtake attempt, defence check, mistake roll)
//! draws from a [`RandomSource`] passed in explicitly; nothing reaches for a
//! global generator.  In a session each AI car owns one [`DriverRng`] seeded
//! by:
//!
//!   seed = session_seed XOR (car_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive car ids uniformly across the seed space.  So:
//!
//! - Cars never share RNG state, so the order in which AI cars are updated
//!   within a tick cannot change what any of them draws.
//! - Replaying a session with the same seed and the same inputs reproduces
//!   every decision bit for bit.
//!
//! [`SequenceRng`] replays a fixed list of values and is how tests force a
//! gate open or shut.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::CarId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Largest value a [`SequenceRng`] will hand out; keeps draws in `[0, 1)`.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// A source of uniform draws in `[0, 1)`.
///
/// Only [`next_f32`](Self::next_f32) is required; the helpers are defined in
/// terms of it so scripted sources behave exactly like seeded ones.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// `true` with probability `p` (clamped to `[0, 1]`).
    #[inline]
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p.clamp(0.0, 1.0)
    }

    /// Uniform value in `[lo, hi)`.
    #[inline]
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// `-1.0` or `+1.0` with equal probability.
    #[inline]
    fn sign(&mut self) -> f32 {
        if self.next_f32() < 0.5 { -1.0 } else { 1.0 }
    }
}

// ── DriverRng ─────────────────────────────────────────────────────────────────

/// Per-car deterministic RNG.
///
/// Created once when the car is spawned and kept for the car's lifetime
/// (a respawn keeps the stream; it does not reseed).
pub struct DriverRng(SmallRng);

impl DriverRng {
    /// Seed deterministically from the session seed and a car id.
    pub fn new(session_seed: u64, car: CarId) -> Self {
        let seed = session_seed ^ car.raw().wrapping_mul(MIXING_CONSTANT);
        DriverRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl RandomSource for DriverRng {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }
}

// ── SequenceRng ───────────────────────────────────────────────────────────────

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`.  An empty sequence always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values = values.into_iter().map(|v| v.clamp(0.0, BELOW_ONE)).collect();
        Self { values, cursor: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f32) -> Self {
        Self::new([value])
    }

    /// How many draws have been taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
