// Based on https://github.com/rust-random/rand/blob/master/rand_pcg/src/pcg64.rs, which is
//
// Copyright 2018 Developers of the Rand project.
// Copyright 2017 Paul Dicker.
// Copyright 2014-2017 Melissa O'Neill and PCG Project contributors
//
// and licensed under the MIT license.

use core::fmt;
use rand_core::{impls, Error, RngCore, SeedableRng};

// This is the default multiplier used by PCG for 64-bit state.
const MULTIPLIER: u64 = 0x5851f42d4c957f2d;
const INCREMENT: u64 = 0xb47c73972972b7b7;
const INITIAL_OFFSET: u64 = 0x3d657cc62bc341e;

/// A PCG random number generator (XSH RR 64/32 (LCG) variant).
///
/// This is the random source record generation draws from. It is passed
/// around explicitly rather than living in a global, so a run can be
/// reproduced by handing the same seed to [`RecordRng::new`].
///
/// Any other `rand::Rng` works with the generator too; this one exists so
/// that seeds printed in logs stay meaningful across `rand` upgrades.
#[derive(Clone, PartialEq, Eq)]
pub struct RecordRng {
    state: u64,
    seed: u64,
}

impl RecordRng {
    pub fn new(seed: u64) -> Self {
        RecordRng {
            state: seed.wrapping_mul(MULTIPLIER).wrapping_sub(INITIAL_OFFSET),
            seed,
        }
    }

    /// Seeds from the thread-local entropy source; every run differs.
    pub fn from_os_entropy() -> Self {
        Self::new(rand::thread_rng().next_u64())
    }

    /// The seed this generator was created with, for replaying a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    fn step(&mut self) {
        // prepare the LCG for the next round
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
    }
}

// Custom Debug implementation that does not expose the internal state
impl fmt::Debug for RecordRng {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RecordRng {{ seed: {} }}", self.seed)
    }
}

impl RngCore for RecordRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let state = self.state;
        self.step();

        // Output function XSH RR: xorshift high (bits), followed by a random rotate
        // Constants are for 64-bit state, 32-bit output
        const ROTATE: u32 = 59; // 64 - 5
        const XSHIFT: u32 = 18; // (5 + 32) / 2
        const SPARE: u32 = 27; // 64 - 32 - 5

        let rot = (state >> ROTATE) as u32;
        let xsh = (((state >> XSHIFT) ^ state) >> SPARE) as u32;
        xsh.rotate_right(rot)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RecordRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut first = RecordRng::new(12345);
        let mut second = RecordRng::new(12345);
        for _ in 0..64 {
            assert_eq!(first.next_u32(), second.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut first = RecordRng::new(1);
        let mut second = RecordRng::new(2);
        let a: Vec<u32> = (0..8).map(|_| first.next_u32()).collect();
        let b: Vec<u32> = (0..8).map(|_| second.next_u32()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn from_seed_matches_new() {
        let seed = 0xdead_beef_u64;
        assert_eq!(RecordRng::from_seed(seed.to_le_bytes()), RecordRng::new(seed));
        assert_eq!(RecordRng::seed_from_u64(seed), RecordRng::new(seed));
    }

    #[test]
    fn debug_hides_state() {
        let rng = RecordRng::new(7);
        assert_eq!(format!("{:?}", rng), "RecordRng { seed: 7 }");
    }
}
