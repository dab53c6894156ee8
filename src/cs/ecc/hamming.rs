//! Hamming error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! The (7,4) variant implemented here encodes 4 data bits into 7 bits by adding 3 parity bits,
//! and corrects any single flipped bit per codeword. Two or more flipped bits are not detected:
//! the decoder "corrects" them to a neighbouring, wrong codeword.
//!
//! # Layout
//!
//! Codeword positions are numbered 1..=7. Parity bits sit at the powers of two {4, 2, 1} and
//! data bits at {7, 6, 5, 3}. Bits travel in position order 7, 6, 5, 4, 3, 2, 1, so stream
//! index `i` of a codeword holds position `7 - i`.
//!
//! Parity and syndrome are computed the same way: take the 3-bit binary code of every
//! position holding a 1 and XOR them slot by slot. For a valid codeword the result is zero;
//! after a single flip it is the position of the flipped bit.
//!
//! # Applications
//!
//! - Computer memory (ECC RAM)
//! - Satellite communications
//! - Digital broadcasting
//! - Data storage systems

use crate::cs::ecc::bits::{self, Bits};
use crate::cs::ecc::{ErrorCorrection, Result};
use bitvec::prelude::*;
use std::fmt;

pub mod decoder;
pub mod encoder;

pub use decoder::{DecodeReport, HammingDecoder};
pub use encoder::HammingEncoder;

/// Number of data bits per codeword
pub const DATA_BITS: usize = 4;

/// Number of parity bits per codeword
pub const PARITY_BITS: usize = 3;

/// Total codeword length
pub const CODEWORD_BITS: usize = DATA_BITS + PARITY_BITS;

/// Hamming positions of the data bits, in the order they arrive
pub const DATA_POSITIONS: [u8; DATA_BITS] = [7, 6, 5, 3];

/// Hamming positions of the parity bits p4, p2, p1
pub const PARITY_POSITIONS: [u8; PARITY_BITS] = [4, 2, 1];

/// Returns the Hamming position stored at stream index `index` (0..7) of a codeword.
pub const fn position_at(index: usize) -> u8 {
    (CODEWORD_BITS - index) as u8
}

/// The 3-bit binary code of a position, most significant slot first.
/// 7 → [1,1,1], 6 → [1,1,0], 5 → [1,0,1], 3 → [0,1,1].
fn position_code(position: u8) -> [bool; 3] {
    [
        (position >> 2) & 1 == 1,
        (position >> 1) & 1 == 1,
        position & 1 == 1,
    ]
}

/// XORs the position codes of `positions` slot by slot.
///
/// Slot 0 is the 4s check, slot 1 the 2s check, slot 2 the 1s check. An even
/// number of ones in a slot gives `false`.
pub(crate) fn parity_triple(positions: impl IntoIterator<Item = u8>) -> [bool; 3] {
    positions
        .into_iter()
        .map(position_code)
        .fold([false; 3], |mut acc, code| {
            for (slot, bit) in acc.iter_mut().zip(code) {
                *slot ^= bit;
            }
            acc
        })
}

/// Four data bits `d7 d6 d5 d3`; the first to arrive is the most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataGroup(u8);

impl DataGroup {
    /// Builds a group from the low 4 bits of `value`.
    pub const fn new(value: u8) -> Self {
        DataGroup(value & 0x0F)
    }

    /// Builds a group from up to 4 bits, zero-padding a short group on the right.
    pub fn from_bits(bits: &BitSlice<u8, Msb0>) -> Self {
        debug_assert!(bits.len() <= DATA_BITS);
        let packed = bits
            .iter()
            .by_vals()
            .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit));
        DataGroup::new(packed << (DATA_BITS - bits.len()))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// The `index`-th bit in arrival order (0 = d7, 3 = d3).
    pub const fn bit(self, index: usize) -> bool {
        (self.0 >> (DATA_BITS - 1 - index)) & 1 == 1
    }

    /// Hamming positions of the data bits that are set.
    pub fn set_positions(self) -> impl Iterator<Item = u8> {
        DATA_POSITIONS
            .into_iter()
            .enumerate()
            .filter(move |&(i, _)| self.bit(i))
            .map(|(_, position)| position)
    }

    /// Appends the 4 bits to `out` in arrival order.
    pub fn push_to(self, out: &mut Bits) {
        for i in 0..DATA_BITS {
            out.push(self.bit(i));
        }
    }
}

impl fmt::Display for DataGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

/// A 7-bit codeword.
///
/// Bit `p - 1` of the inner value holds Hamming position `p`, so writing the
/// value's low 7 bits MSB-first yields the stream order 7, 6, 5, 4, 3, 2, 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Codeword(u8);

impl Codeword {
    /// Builds a codeword from the low 7 bits of `value`.
    pub const fn from_value(value: u8) -> Self {
        Codeword(value & 0x7F)
    }

    /// Reads exactly 7 bits in stream order.
    pub fn from_bits(bits: &BitSlice<u8, Msb0>) -> Self {
        debug_assert_eq!(bits.len(), CODEWORD_BITS);
        Codeword::from_value(
            bits.iter()
                .by_vals()
                .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit)),
        )
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Bit at Hamming position `position` (1..=7).
    pub const fn bit(self, position: u8) -> bool {
        (self.0 >> (position - 1)) & 1 == 1
    }

    /// Sets the bit at Hamming position `position` (1..=7).
    pub fn set(&mut self, position: u8, value: bool) {
        debug_assert!((1..=CODEWORD_BITS as u8).contains(&position));
        let mask = 1 << (position - 1);
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Inverts the bit at Hamming position `position` (1..=7).
    pub fn flip(&mut self, position: u8) {
        debug_assert!((1..=CODEWORD_BITS as u8).contains(&position));
        self.0 ^= 1 << (position - 1);
    }

    /// Inverts the bit at stream index `index` (0..7).
    pub fn flip_index(&mut self, index: usize) {
        self.flip(position_at(index));
    }

    /// Hamming positions (7 down to 1) holding a 1.
    pub fn set_positions(self) -> impl Iterator<Item = u8> {
        (1..=CODEWORD_BITS as u8).rev().filter(move |&p| self.bit(p))
    }

    /// Error syndrome of the received bits.
    pub fn syndrome(self) -> Syndrome {
        Syndrome::from_triple(parity_triple(self.set_positions()))
    }

    /// True when all three parity checks are even.
    pub fn is_valid(self) -> bool {
        self.syndrome().is_zero()
    }

    /// Data bits from positions 7, 6, 5, 3, without any correction.
    pub fn data(self) -> DataGroup {
        DATA_POSITIONS
            .into_iter()
            .fold(DataGroup::default(), |group, position| {
                DataGroup::new((group.value() << 1) | u8::from(self.bit(position)))
            })
    }

    /// Appends the 7 bits to `out` in stream order.
    pub fn push_to(self, out: &mut Bits) {
        for index in 0..CODEWORD_BITS {
            out.push(self.bit(position_at(index)));
        }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:07b}", self.0)
    }
}

/// The 3-bit result of the parity checks over a received codeword.
///
/// Zero means no detected error; any other value names the Hamming position
/// to flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Syndrome(u8);

impl Syndrome {
    fn from_triple([fours, twos, ones]: [bool; 3]) -> Self {
        Syndrome((u8::from(fours) << 2) | (u8::from(twos) << 1) | u8::from(ones))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The Hamming position indicated by the syndrome, if any.
    pub const fn error_position(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0)
        }
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}

/// The standard (7,4) Hamming code over byte sequences.
///
/// Bytes are unpacked MSB-first, encoded group by group, and packed back with
/// zero padding to a byte boundary. Decoding drops the trailing bits that do
/// not form a whole codeword and any trailing data bits short of a byte.
///
/// # Examples
///
/// ```
/// use hamming74::{ErrorCorrection, HammingCode};
///
/// let code = HammingCode::new();
/// let mut encoded = code.encode(&[0xA5]).unwrap();
/// assert_eq!(encoded, vec![0xA4, 0xB4]);
///
/// // One flipped bit in the first codeword is repaired
/// encoded[0] ^= 0x10;
/// assert_eq!(code.decode(&encoded).unwrap(), vec![0xA5]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingCode {
    encoder: HammingEncoder,
    decoder: HammingDecoder,
}

impl HammingCode {
    /// Creates a standard (7,4) Hamming code
    ///
    /// # Returns
    ///
    /// A new `HammingCode` instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the number of data bits per block
    pub const fn data_bits(&self) -> usize {
        DATA_BITS
    }

    /// Gets the number of parity bits per block
    pub const fn parity_bits(&self) -> usize {
        PARITY_BITS
    }

    /// Gets the total code word length (data bits + parity bits)
    pub const fn total_bits(&self) -> usize {
        CODEWORD_BITS
    }

    /// Gets the number of encoded bytes produced for a given number of input bytes
    ///
    /// # Arguments
    ///
    /// * `input_bytes` - Length of the unencoded data
    ///
    /// # Returns
    ///
    /// `ceil(14 * input_bytes / 8)`, the length [`encode_bytes`](Self::encode_bytes) returns
    pub fn encoded_len(&self, input_bytes: usize) -> usize {
        let blocks = (input_bytes * 8).div_ceil(DATA_BITS);
        (blocks * CODEWORD_BITS).div_ceil(8)
    }

    /// Encodes a byte slice, padding the output to a whole byte.
    ///
    /// # Arguments
    ///
    /// * `data` - Data to encode
    ///
    /// # Returns
    ///
    /// The encoded data with parity bits
    pub fn encode_bytes(&self, data: &[u8]) -> Vec<u8> {
        let encoded = self.encoder.encode(bits::unpack(data));
        bits::pack(&encoded, true)
    }

    /// Decodes a byte slice, correcting one flipped bit per codeword.
    ///
    /// # Arguments
    ///
    /// * `encoded` - Data to decode
    ///
    /// # Returns
    ///
    /// The decoded data with errors corrected
    pub fn decode_bytes(&self, encoded: &[u8]) -> Vec<u8> {
        self.decode_bytes_with_report(encoded).0
    }

    /// Like [`decode_bytes`](Self::decode_bytes), also returning what the decoder saw.
    pub fn decode_bytes_with_report(&self, encoded: &[u8]) -> (Vec<u8>, DecodeReport) {
        let (decoded, report) = self.decoder.decode_with_report(&bits::unpack(encoded));
        (bits::pack(&decoded, false), report)
    }
}

impl ErrorCorrection for HammingCode {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encode_bytes(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.decode_bytes(data))
    }
}

/// Encodes data using standard (7,4) Hamming code
pub fn hamming_encode(data: &[u8]) -> Vec<u8> {
    HammingCode::new().encode_bytes(data)
}

/// Decodes data using standard (7,4) Hamming code
pub fn hamming_decode(encoded: &[u8]) -> Vec<u8> {
    HammingCode::new().decode_bytes(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_hamming_creation() {
        let hamming = HammingCode::new();
        assert_eq!(hamming.data_bits(), 4);
        assert_eq!(hamming.parity_bits(), 3);
        assert_eq!(hamming.total_bits(), 7);
    }

    #[test]
    fn test_position_layout() {
        let positions: Vec<u8> = (0..CODEWORD_BITS).map(position_at).collect();
        assert_eq!(positions, vec![7, 6, 5, 4, 3, 2, 1]);
        for p in PARITY_POSITIONS {
            assert_eq!(p.count_ones(), 1);
        }
        for p in DATA_POSITIONS {
            assert!(p.count_ones() > 1);
        }
    }

    #[test]
    fn test_position_codes() {
        assert_eq!(position_code(7), [true, true, true]);
        assert_eq!(position_code(6), [true, true, false]);
        assert_eq!(position_code(5), [true, false, true]);
        assert_eq!(position_code(3), [false, true, true]);
        assert_eq!(parity_triple(std::iter::empty()), [false; 3]);
        assert_eq!(parity_triple([7, 5]), [false, true, false]);
    }

    #[test]
    fn test_codeword_bit_access() {
        let mut cw = Codeword::from_value(0b1010010);
        assert!(cw.bit(7));
        assert!(!cw.bit(6));
        assert!(cw.bit(5));
        assert!(cw.bit(2));
        assert_eq!(cw.set_positions().collect::<Vec<_>>(), vec![7, 5, 2]);

        cw.flip_index(0);
        assert_eq!(cw.value(), 0b0010010);
        cw.set(7, true);
        assert_eq!(cw.value(), 0b1010010);
        assert_eq!(cw.to_string(), "1010010");
        assert_eq!(cw.data(), DataGroup::new(0b1010));
    }

    #[test]
    fn test_data_group_from_short_bits() {
        let short = bitvec![u8, Msb0; 1, 1];
        assert_eq!(DataGroup::from_bits(&short), DataGroup::new(0b1100));
        assert_eq!(DataGroup::new(0xFF).value(), 0x0F);
        assert_eq!(DataGroup::new(0b0101).to_string(), "0101");
    }

    #[test]
    fn test_encode_a5() {
        // 0xA5 = 1010 0101
        //   1010 -> d7=1 d6=0 d5=1 d3=0 -> p4=0 p2=1 p1=0 -> 1010010
        //   0101 -> d7=0 d6=1 d5=0 d3=1 -> p4=1 p2=0 p1=1 -> 0101101
        // 14 bits padded to 16: 10100100 10110100
        let encoded = hamming_encode(&[0xA5]);
        assert_eq!(encoded, vec![0xA4, 0xB4]);
        assert_eq!(hamming_decode(&encoded), vec![0xA5]);
    }

    #[test]
    fn test_a5_single_flip_in_either_codeword() {
        let clean = bits::unpack(&hamming_encode(&[0xA5]));
        for index in 0..2 * CODEWORD_BITS {
            let mut noisy = clean.clone();
            let bit = noisy[index];
            noisy.set(index, !bit);
            let decoded = bits::pack(&HammingDecoder::new().decode(&noisy), false);
            assert_eq!(decoded, vec![0xA5], "flip at bit {}", index);
        }
    }

    #[test]
    fn test_hamming_encode_decode_no_errors() {
        let data = b"Test data for Hamming code";
        let hamming = HammingCode::new();

        let encoded = hamming.encode(data).unwrap();
        assert_eq!(encoded.len(), hamming.encoded_len(data.len()));
        let decoded = hamming.decode(&encoded).unwrap();

        assert_eq!(decoded, data);
    }

    #[test]
    fn test_round_trip_random_lengths() {
        let mut rng = StdRng::seed_from_u64(0x7417);
        let hamming = HammingCode::new();
        for len in 0..64 {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let encoded = hamming.encode_bytes(&data);
            assert_eq!(encoded.len(), hamming.encoded_len(len));
            assert_eq!(hamming.decode_bytes(&encoded), data);
        }
    }

    #[test]
    fn test_hamming_error_correction() {
        let data = b"Test";
        let hamming = HammingCode::new();

        let mut encoded = hamming.encode(data).unwrap();

        // Introduce a single bit error in the first byte
        encoded[0] ^= 0x40;

        let (decoded, report) = hamming.decode_bytes_with_report(&encoded);
        assert_eq!(decoded, data);
        assert_eq!(report.corrected, 1);
    }

    #[test]
    fn test_encoded_len() {
        let hamming = HammingCode::new();
        assert_eq!(hamming.encoded_len(0), 0);
        assert_eq!(hamming.encoded_len(1), 2);
        assert_eq!(hamming.encoded_len(3), 6);
        assert_eq!(hamming.encoded_len(4), 7);
    }

    #[test]
    fn test_empty_input() {
        let hamming = HammingCode::new();

        let encoded = hamming.encode(&[]).unwrap();
        assert!(encoded.is_empty());

        let decoded = hamming.decode(&[]).unwrap();
        assert!(decoded.is_empty());
    }
}
