//! Hamming(7,4) syndrome decoder.
//!
//! Each received codeword is checked, a nonzero syndrome flips the bit it
//! names, and the 4 data bits are read back out. A trailing run shorter than
//! a codeword is dropped.

use super::{Codeword, DataGroup, Syndrome, CODEWORD_BITS, DATA_BITS};
use crate::cs::ecc::bits::Bits;
use bitvec::prelude::*;
use log::{debug, trace};

/// Counts gathered while decoding one bit sequence.
///
/// `corrected` counts codewords with a nonzero syndrome. A codeword with two or
/// more flipped bits is counted there too, even though its data came out wrong;
/// Hamming(7,4) cannot tell the two cases apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Whole codewords decoded
    pub codewords: usize,
    /// Codewords where one bit was flipped back
    pub corrected: usize,
    /// Trailing bits that did not form a whole codeword
    pub discarded_bits: usize,
}

/// Corrects single-bit errors and extracts the original data bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingDecoder;

impl HammingDecoder {
    pub fn new() -> Self {
        HammingDecoder
    }

    pub fn syndrome(&self, codeword: Codeword) -> Syndrome {
        codeword.syndrome()
    }

    /// Flips the bit named by the syndrome, if any.
    ///
    /// Returns the corrected codeword together with the syndrome of the
    /// received one.
    pub fn correct(&self, mut codeword: Codeword) -> (Codeword, Syndrome) {
        let syndrome = codeword.syndrome();
        if let Some(position) = syndrome.error_position() {
            codeword.flip(position);
        }
        (codeword, syndrome)
    }

    /// Corrects `codeword` and returns its data bits.
    pub fn decode_codeword(&self, codeword: Codeword) -> DataGroup {
        self.correct(codeword).0.data()
    }

    /// Decodes the largest prefix of `encoded` that is a multiple of 7 bits.
    pub fn decode(&self, encoded: &BitSlice<u8, Msb0>) -> Bits {
        self.decode_with_report(encoded).0
    }

    /// Decodes `encoded` and reports what was seen on the way.
    ///
    /// # Arguments
    ///
    /// * `encoded` - Received codewords; a trailing partial codeword is ignored
    ///
    /// # Returns
    ///
    /// The corrected data bits and a [`DecodeReport`]
    pub fn decode_with_report(&self, encoded: &BitSlice<u8, Msb0>) -> (Bits, DecodeReport) {
        let chunks = encoded.chunks_exact(CODEWORD_BITS);
        let mut report = DecodeReport {
            discarded_bits: chunks.remainder().len(),
            ..DecodeReport::default()
        };

        let mut decoded = Bits::with_capacity(encoded.len() / CODEWORD_BITS * DATA_BITS);
        for (index, chunk) in chunks.enumerate() {
            let (corrected, syndrome) = self.correct(Codeword::from_bits(chunk));
            if let Some(position) = syndrome.error_position() {
                trace!(
                    "codeword {}: syndrome {}, flipped position {}",
                    index,
                    syndrome,
                    position
                );
                report.corrected += 1;
            }
            corrected.data().push_to(&mut decoded);
            report.codewords += 1;
        }

        debug!(
            "decoded {} codewords ({} corrected, {} trailing bits dropped)",
            report.codewords, report.corrected, report.discarded_bits
        );
        (decoded, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::hamming::HammingEncoder;

    fn valid_codewords() -> Vec<Codeword> {
        let encoder = HammingEncoder::new();
        (0..16)
            .map(|v| encoder.encode_group(DataGroup::new(v)))
            .collect()
    }

    #[test]
    fn test_clean_codeword_has_zero_syndrome() {
        let decoder = HammingDecoder::new();
        for codeword in valid_codewords() {
            assert!(decoder.syndrome(codeword).is_zero());
            assert_eq!(decoder.correct(codeword), (codeword, Syndrome::default()));
        }
    }

    #[test]
    fn test_single_bit_correction_every_index() {
        let decoder = HammingDecoder::new();
        for codeword in valid_codewords() {
            for index in 0..CODEWORD_BITS {
                let mut received = codeword;
                received.flip_index(index);

                let (corrected, syndrome) = decoder.correct(received);
                assert_eq!(corrected, codeword, "{} flipped at index {}", codeword, index);
                // The syndrome names the Hamming position, index 0 being position 7
                assert_eq!(syndrome.value() as usize, CODEWORD_BITS - index);
                assert_eq!(decoder.decode_codeword(received), codeword.data());
            }
        }
    }

    #[test]
    fn test_two_bit_errors_are_miscorrected() {
        let decoder = HammingDecoder::new();
        for codeword in valid_codewords() {
            for i in 0..CODEWORD_BITS {
                for j in i + 1..CODEWORD_BITS {
                    let mut received = codeword;
                    received.flip_index(i);
                    received.flip_index(j);

                    let (corrected, syndrome) = decoder.correct(received);
                    assert!(!syndrome.is_zero());
                    assert!(corrected.is_valid());
                    assert_ne!(corrected, codeword);
                }
            }
        }
    }

    #[test]
    fn test_truncates_partial_codeword() {
        // 0101101 followed by 5 stray bits
        let encoded = bitvec![u8, Msb0; 0, 1, 0, 1, 1, 0, 1, 1, 1, 1, 1, 1];
        let (decoded, report) = HammingDecoder::new().decode_with_report(&encoded);

        assert_eq!(decoded, bitvec![u8, Msb0; 0, 1, 0, 1]);
        assert_eq!(
            report,
            DecodeReport {
                codewords: 1,
                corrected: 0,
                discarded_bits: 5,
            }
        );
    }

    #[test]
    fn test_shorter_than_a_codeword() {
        let encoded = bitvec![u8, Msb0; 1, 0, 1];
        let (decoded, report) = HammingDecoder::new().decode_with_report(&encoded);
        assert!(decoded.is_empty());
        assert_eq!(report.discarded_bits, 3);
    }

    #[test]
    fn test_report_counts_corrections() {
        let data: Bits = (0..64).map(|i| i % 5 < 2).collect();
        let mut encoded = HammingEncoder::new().encode(data.clone());
        // Flip one bit in the 2nd and 5th codewords
        for codeword in [1, 4] {
            let index = codeword * CODEWORD_BITS + 3;
            let bit = encoded[index];
            encoded.set(index, !bit);
        }

        let (decoded, report) = HammingDecoder::new().decode_with_report(&encoded);
        assert_eq!(decoded, data);
        assert_eq!(report.codewords, 16);
        assert_eq!(report.corrected, 2);
        assert_eq!(report.discarded_bits, 0);
    }
}
