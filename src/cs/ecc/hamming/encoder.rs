//! Hamming(7,4) encoder.

use super::{
    parity_triple, Codeword, DataGroup, CODEWORD_BITS, DATA_BITS, DATA_POSITIONS, PARITY_POSITIONS,
};
use crate::cs::ecc::bits::{self, Bits};
use log::debug;

/// Expands 4-bit data groups into 7-bit codewords.
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingEncoder;

impl HammingEncoder {
    pub fn new() -> Self {
        HammingEncoder
    }

    /// Computes the three parity bits for `group` and assembles the codeword.
    ///
    /// The parity triple is the slot-wise XOR of the position codes of the set
    /// data bits, which works out to
    /// `p4 = d5 ^ d6 ^ d7`, `p2 = d3 ^ d6 ^ d7`, `p1 = d3 ^ d5 ^ d7`.
    pub fn encode_group(&self, group: DataGroup) -> Codeword {
        let parity = parity_triple(group.set_positions());

        let mut codeword = Codeword::default();
        for (i, position) in DATA_POSITIONS.into_iter().enumerate() {
            codeword.set(position, group.bit(i));
        }
        for (position, bit) in PARITY_POSITIONS.into_iter().zip(parity) {
            codeword.set(position, bit);
        }
        codeword
    }

    /// Encodes a bit sequence.
    ///
    /// The input is zero-padded to a multiple of 4 bits first, so the output
    /// holds exactly `ceil(len / 4)` codewords.
    ///
    /// # Arguments
    ///
    /// * `data` - Data bits, consumed
    ///
    /// # Returns
    ///
    /// The codewords back to back, 7 bits each
    pub fn encode(&self, mut data: Bits) -> Bits {
        let data_len = data.len();
        bits::pad_to_multiple(&mut data, DATA_BITS);

        let groups = data.len() / DATA_BITS;
        let mut encoded = Bits::with_capacity(groups * CODEWORD_BITS);
        for chunk in data.chunks_exact(DATA_BITS) {
            self.encode_group(DataGroup::from_bits(chunk))
                .push_to(&mut encoded);
        }

        debug!(
            "encoded {} data bits ({} padding) into {} codewords",
            data_len,
            data.len() - data_len,
            groups
        );
        encoded
    }
}
