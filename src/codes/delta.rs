/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Elias δ code.
//!
//! The δ code of an integer `n` ≥ 1 is the [γ code](super::gamma) of
//! `k` + 1, where `k` = ⌊log₂ `n`⌋, followed by the low `k` bits of `n`.
//! Asymptotically shorter than γ (the length prefix is itself compressed),
//! at the price of slightly longer codewords for very small values.
//!
//! Zero is not in the domain; callers encode `n + 1` if zero must be
//! representable.

use super::gamma::{GammaRead, GammaWrite, len_gamma};
use crate::traits::*;
use crate::{Error, Result};

/// Longest δ codeword: γ(64) and 63 remainder bits.
const MAX_DELTA: usize = 76;

/// Returns the length of the δ code for `n`.
///
/// # Panics
///
/// In debug mode, if `n` is zero.
#[must_use]
#[inline]
pub fn len_delta(n: u64) -> usize {
    debug_assert!(n >= 1);
    let k = n.ilog2();
    len_gamma(k as u64 + 1) + k as usize
}

/// Trait for reading δ codes.
pub trait DeltaRead: GammaRead {
    #[inline]
    fn read_delta(&mut self) -> Result<u64> {
        let start = self.bit_pos();
        let k = self.read_gamma()? - 1;
        if k > 63 {
            return Err(Error::CodewordOverflow {
                bit_pos: start,
                max_bits: MAX_DELTA,
            });
        }
        if k == 0 {
            return Ok(1);
        }
        Ok(1 << k | self.read_bits(k as usize)?)
    }

    #[inline]
    fn skip_delta(&mut self) -> Result<()> {
        let start = self.bit_pos();
        let k = self.read_gamma()? - 1;
        if k > 63 {
            return Err(Error::CodewordOverflow {
                bit_pos: start,
                max_bits: MAX_DELTA,
            });
        }
        self.skip_bits(k as usize)
    }
}

/// Trait for writing δ codes.
pub trait DeltaWrite: GammaWrite {
    #[inline]
    fn write_delta(&mut self, n: u64) -> Result<usize> {
        if n == 0 {
            return Err(Error::Domain {
                code: "delta",
                value: 0,
            });
        }
        let k = n.ilog2();
        let mut written = self.write_gamma(k as u64 + 1)?;
        written += self.write_bits(n ^ 1 << k, k as usize)?;
        Ok(written)
    }
}

impl<B: BitRead> DeltaRead for B {}
impl<B: BitWrite> DeltaWrite for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{BitReader, BitWriter};

    #[test]
    fn small_codewords() {
        // δ(1) = 1, δ(2) = 0100, δ(5) = 01101.
        let mut buf = [0u8; 2];
        let mut writer = BitWriter::new(&mut buf);
        assert_eq!(writer.write_delta(1).unwrap(), 1);
        assert_eq!(writer.write_delta(2).unwrap(), 4);
        assert_eq!(writer.write_delta(5).unwrap(), 5);
        assert_eq!(buf[0], 0b1_0100_011);
        assert_eq!(buf[1], 0b01_000000);

        let mut reader = BitReader::new(&buf);
        assert_eq!(reader.read_delta().unwrap(), 1);
        assert_eq!(reader.read_delta().unwrap(), 2);
        assert_eq!(reader.read_delta().unwrap(), 5);
    }

    #[test]
    fn round_trip_extremes() {
        for n in [1, 2, 3, (1 << 32) - 1, 1 << 32, u64::MAX] {
            let mut buf = [0u8; 16];
            let mut writer = BitWriter::new(&mut buf);
            let written = writer.write_delta(n).unwrap();
            assert_eq!(written, len_delta(n));

            let mut reader = BitReader::new(&buf);
            assert_eq!(reader.read_delta().unwrap(), n);
            assert_eq!(reader.bit_pos(), written as u64);
        }
    }

    #[test]
    fn zero_is_rejected() {
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf);
        assert!(matches!(
            writer.write_delta(0),
            Err(Error::Domain { code: "delta", .. })
        ));
    }

    #[test]
    fn skip_matches_read() {
        let mut buf = [0u8; 8];
        let mut writer = BitWriter::new(&mut buf);
        writer.write_delta(123456).unwrap();
        let end = writer.bit_pos();

        let mut reader = BitReader::new(&buf);
        reader.skip_delta().unwrap();
        assert_eq!(reader.bit_pos(), end);
    }
}
