//! Error correction code implementations.
//!
//! This module provides the pieces of a Hamming(7,4) channel:
//! - Bit packing between bytes and MSB-first bit sequences
//! - Hamming(7,4) encoding and syndrome decoding
//! - A noise injector that flips single bits in codewords
//!
//! # Error Correction Algorithms
//!
//! Error correction codes are used to detect and correct errors in data
//! transmission and storage, making digital communications more reliable.
//!
//! # Examples
//!
//! ```rust
//! use hamming74::cs::ecc::{ErrorCorrection, HammingCode};
//!
//! let code = HammingCode::new();
//! let encoded = code.encode(b"ecc").unwrap();
//! assert_eq!(code.decode(&encoded).unwrap(), b"ecc");
//! ```

pub use crate::cs::error::Result;

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode data with error correction symbols
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode data and correct errors if possible
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// MSB-first conversion between bytes and bit sequences
pub mod bits;
pub use bits::Bits;

/// Hamming(7,4) codes
pub mod hamming;
pub use hamming::{
    hamming_decode, hamming_encode, Codeword, DataGroup, DecodeReport, HammingCode,
    HammingDecoder, HammingEncoder, Syndrome,
};

/// Simulated channel noise
pub mod noise;
pub use noise::{NoiseInjector, NoiseParameters, NoiseReport};
