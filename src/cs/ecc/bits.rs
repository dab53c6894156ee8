//! Conversion between byte sequences and bit sequences.
//!
//! Bits are always ordered MSB-first within a byte and bytes are walked
//! forward, so bit 7 of `bytes[0]` is the first bit of the sequence. The
//! mapping is bijective for bit lengths that are multiples of 8.

use bitvec::prelude::*;

/// An owned, MSB-first bit sequence.
pub type Bits = BitVec<u8, Msb0>;

/// Expands each byte into its 8 bits, MSB-first, in byte order.
///
/// The result is always `8 * bytes.len()` bits long.
pub fn unpack(bytes: &[u8]) -> Bits {
    bytes.view_bits::<Msb0>().to_bitvec()
}

/// Packs consecutive runs of 8 bits into bytes, MSB-first.
///
/// With `pad` set, a trailing partial byte is completed with zero bits.
/// Without it the trailing bits are dropped, which loses data unless the
/// caller already knows the sequence is byte aligned.
///
/// # Arguments
///
/// * `bits` - Bits to pack, first bit most significant
/// * `pad` - Whether to zero-fill a trailing partial byte
///
/// # Returns
///
/// `ceil(len / 8)` bytes when padding, `floor(len / 8)` otherwise
///
/// # Examples
///
/// ```
/// use hamming74::bits::{pack, unpack};
///
/// let bits = unpack(&[0xA4, 0xB4]);
/// assert_eq!(pack(&bits[..14], true), vec![0xA4, 0xB4]);
/// assert_eq!(pack(&bits[..14], false), vec![0xA4]);
/// ```
pub fn pack(bits: &BitSlice<u8, Msb0>, pad: bool) -> Vec<u8> {
    let chunks = bits.chunks_exact(8);
    let tail = chunks.remainder();

    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    bytes.extend(chunks.map(byte_from_bits));

    if pad && !tail.is_empty() {
        bytes.push(byte_from_bits(tail) << (8 - tail.len()));
    }
    bytes
}

/// Appends zero bits until the length is a multiple of `n`.
pub fn pad_to_multiple(bits: &mut Bits, n: usize) {
    if n == 0 {
        return;
    }
    let rem = bits.len() % n;
    if rem != 0 {
        bits.resize(bits.len() + n - rem, false);
    }
}

// At most 8 bits, first bit most significant.
fn byte_from_bits(bits: &BitSlice<u8, Msb0>) -> u8 {
    bits.iter()
        .by_vals()
        .fold(0u8, |acc, bit| (acc << 1) | u8::from(bit))
}
