//! Simulated channel noise for Hamming(7,4) codewords.
//!
//! The injector walks an encoded bit sequence codeword by codeword. For each
//! one it rolls a die with `odds` faces; when the roll equals `sentinel` it
//! picks one of the 7 bits uniformly and inverts it. With the default 7-sided
//! die every codeword independently has a 1/7 chance of exactly one flipped
//! bit, which is always within what the decoder can repair.
//!
//! Output is random by construction. Two runs over the same input differ
//! unless the injector was built with the same seed.

use crate::cs::ecc::bits::Bits;
use crate::cs::ecc::hamming::CODEWORD_BITS;
use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Parameters for configuring the noise injector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseParameters {
    /// Number of faces on the per-codeword die
    pub odds: u32,
    /// Roll that triggers a flip, in `0..odds`
    pub sentinel: u32,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            odds: 7,
            sentinel: 4,
        }
    }
}

impl NoiseParameters {
    pub fn new(odds: u32, sentinel: u32) -> Result<Self> {
        let params = Self { odds, sentinel };
        params.validate()?;
        Ok(params)
    }

    /// Checks that the sentinel is a face of the die.
    pub fn validate(&self) -> Result<()> {
        if self.odds == 0 {
            return Err(Error::InvalidInput("noise odds must be positive".to_string()));
        }
        if self.sentinel >= self.odds {
            return Err(Error::InvalidInput(format!(
                "noise sentinel {} must be below odds {}",
                self.sentinel, self.odds
            )));
        }
        Ok(())
    }

    /// Chance that a given codeword receives a flip
    pub fn flip_probability(&self) -> f64 {
        1.0 / self.odds as f64
    }
}

/// What one injection pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoiseReport {
    /// Whole codewords visited
    pub codewords: usize,
    /// Codewords that had one bit inverted
    pub flipped: usize,
}

/// Flips single bits in encoded codewords.
///
/// The injector owns its generator and needs `&mut self` for every pass, so a
/// shared injector has to be wrapped in a lock by the caller.
#[derive(Debug, Clone)]
pub struct NoiseInjector<R = ChaCha20Rng> {
    params: NoiseParameters,
    rng: R,
    seed: Option<u64>,
}

impl NoiseInjector<ChaCha20Rng> {
    /// Creates an injector seeded once from the system clock.
    ///
    /// # Arguments
    ///
    /// * `params` - Die size and trigger roll
    ///
    /// # Returns
    ///
    /// A new `NoiseInjector`, or `Error::InvalidInput` if `params` is invalid
    pub fn new(params: NoiseParameters) -> Result<Self> {
        Self::with_seed(params, clock_seed())
    }

    /// Creates an injector with a fixed seed, for reproducible runs.
    ///
    /// # Arguments
    ///
    /// * `params` - Die size and trigger roll
    /// * `seed` - Seed for the internal `ChaCha20Rng`
    ///
    /// # Returns
    ///
    /// A new `NoiseInjector`, or `Error::InvalidInput` if `params` is invalid
    pub fn with_seed(params: NoiseParameters, seed: u64) -> Result<Self> {
        params.validate()?;
        info!("noise injector seed: {}", seed);
        Ok(Self {
            params,
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed: Some(seed),
        })
    }
}

impl<R: Rng> NoiseInjector<R> {
    /// Creates an injector drawing from an existing generator.
    ///
    /// # Arguments
    ///
    /// * `params` - Die size and trigger roll
    /// * `rng` - Generator to draw from; it is used as is, without reseeding
    ///
    /// # Returns
    ///
    /// A new `NoiseInjector`, or `Error::InvalidInput` if `params` is invalid
    pub fn with_rng(params: NoiseParameters, rng: R) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            rng,
            seed: None,
        })
    }

    pub fn parameters(&self) -> NoiseParameters {
        self.params
    }

    /// Seed of the internal generator, or `None` when built with [`with_rng`](Self::with_rng).
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Injects noise into `bits` in place.
    ///
    /// Only whole 7-bit codewords are touched; trailing bits are left as they are.
    pub fn inject_in_place(&mut self, bits: &mut BitSlice<u8, Msb0>) -> NoiseReport {
        let mut report = NoiseReport::default();

        for codeword in bits.chunks_exact_mut(CODEWORD_BITS) {
            report.codewords += 1;
            if self.rng.gen_range(0..self.params.odds) != self.params.sentinel {
                continue;
            }

            let index = self.rng.gen_range(0..CODEWORD_BITS);
            let bit = codeword[index];
            codeword.set(index, !bit);
            report.flipped += 1;
        }

        debug!(
            "injected noise into {} of {} codewords",
            report.flipped, report.codewords
        );
        report
    }

    /// Consumes `bits` and returns them with noise applied.
    pub fn inject(&mut self, mut bits: Bits) -> Bits {
        self.inject_in_place(&mut bits);
        bits
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
