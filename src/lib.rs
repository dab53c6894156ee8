//! Hamming(7,4) error correction for whole files.
//!
//! Every 4 data bits become a 7-bit codeword with 3 parity bits. The decoder
//! corrects one flipped bit per codeword. A noise stage can flip single bits
//! to simulate a lossy channel between the two.
//!
//! ```
//! use hamming74::{hamming_decode, hamming_encode};
//!
//! let encoded = hamming_encode(&[0xA5]);
//! assert_eq!(encoded, vec![0xA4, 0xB4]);
//! assert_eq!(hamming_decode(&encoded), vec![0xA5]);
//! ```

pub mod cs;
pub mod pipeline;

pub use cs::ecc::{
    bits, hamming, hamming_decode, hamming_encode, noise, ErrorCorrection, HammingCode,
    HammingDecoder, HammingEncoder, NoiseInjector, NoiseParameters,
};
pub use cs::error::{self, Error, Result};
pub use pipeline::{Mode, Pipeline, Summary};
