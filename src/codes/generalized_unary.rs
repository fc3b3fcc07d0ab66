/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Generalized unary code.
//!
//! Given a base `b` ≥ 1, the code for `n` ≥ 0 is the unary code of
//! ⌊`n`/`b`⌋ followed by `n` mod `b` in ⌈log₂ `b`⌉-bit fixed binary. For
//! `b` = 1 this is exactly the unary code; larger bases trade a shorter
//! unary prefix for a fixed-width remainder, which suits mildly skewed
//! distributions (overlap offsets, quality values) where plain unary
//! degenerates.
//!
//! The base is a stream-format parameter: decoding must use the same `b`
//! the stream was written with. Decoding does not validate the remainder
//! against `b`; the decoding rule is simply `q·b + r`.

use crate::traits::*;
use crate::Result;

/// Width of the fixed binary remainder, ⌈log₂ b⌉.
#[inline]
fn remainder_bits(b: u64) -> usize {
    debug_assert!(b >= 1);
    if b <= 1 { 0 } else { ((b - 1).ilog2() + 1) as usize }
}

/// Returns the length of the generalized unary code for `n` with base `b`.
///
/// # Panics
///
/// If `b` is zero.
#[must_use]
#[inline]
pub fn len_generalized_unary(n: u64, b: u64) -> usize {
    assert!(b >= 1, "generalized unary base must be at least 1");
    (n / b) as usize + 1 + remainder_bits(b)
}

/// Trait for reading generalized unary codes.
pub trait GeneralizedUnaryRead: BitRead {
    /// # Panics
    ///
    /// If `b` is zero.
    #[inline]
    fn read_generalized_unary(&mut self, b: u64) -> Result<u64> {
        assert!(b >= 1, "generalized unary base must be at least 1");
        let q = self.read_unary()?;
        let r = self.read_bits(remainder_bits(b))?;
        Ok(q * b + r)
    }
}

/// Trait for writing generalized unary codes.
pub trait GeneralizedUnaryWrite: BitWrite {
    /// # Panics
    ///
    /// If `b` is zero.
    #[inline]
    fn write_generalized_unary(&mut self, n: u64, b: u64) -> Result<usize> {
        assert!(b >= 1, "generalized unary base must be at least 1");
        let written = self.write_unary(n / b)?;
        Ok(written + self.write_bits(n % b, remainder_bits(b))?)
    }
}

impl<B: BitRead> GeneralizedUnaryRead for B {}
impl<B: BitWrite> GeneralizedUnaryWrite for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{BitReader, BitWriter};

    #[test]
    fn base_four_vector() {
        // 11 = 2·4 + 3: unary 110, remainder 11.
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf);
        assert_eq!(writer.write_generalized_unary(11, 4).unwrap(), 5);
        assert_eq!(buf[0], 0b110_11_000);

        let mut reader = BitReader::new(&buf);
        assert_eq!(reader.read_generalized_unary(4).unwrap(), 11);
    }

    #[test]
    fn base_one_is_unary() {
        let mut buf = [0u8; 2];
        let mut writer = BitWriter::new(&mut buf);
        assert_eq!(writer.write_generalized_unary(4, 1).unwrap(), 5);
        assert_eq!(buf[0], 0b11110_000);

        let mut reader = BitReader::new(&buf);
        assert_eq!(reader.read_generalized_unary(1).unwrap(), 4);
    }

    #[test]
    fn non_power_of_two_base() {
        for n in [0, 1, 4, 5, 6, 29, 30, 31] {
            let mut buf = [0u8; 4];
            let mut writer = BitWriter::new(&mut buf);
            let written = writer.write_generalized_unary(n, 5).unwrap();
            assert_eq!(written, len_generalized_unary(n, 5));

            let mut reader = BitReader::new(&buf);
            assert_eq!(reader.read_generalized_unary(5).unwrap(), n);
            assert_eq!(reader.bit_pos(), written as u64);
        }
    }

    #[test]
    #[should_panic(expected = "base must be at least 1")]
    fn base_zero_is_rejected() {
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf);
        let _ = writer.write_generalized_unary(3, 0);
    }

    #[test]
    fn zero_is_in_the_domain() {
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf);
        assert_eq!(writer.write_generalized_unary(0, 8).unwrap(), 4);

        let mut reader = BitReader::new(&buf);
        assert_eq!(reader.read_generalized_unary(8).unwrap(), 0);
    }
}
