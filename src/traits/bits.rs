/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use crate::{Error, Result};

/// Longest accepted unary run, in one-bits.
///
/// Unary codewords are `n` one-bits and a terminating zero-bit, so their
/// length grows linearly with the value; a run cap keeps decode loops
/// terminating on corrupt input and bounds the damage of encoding a value
/// that was never meant to be stored in unary form. The cap is far beyond
/// anything the skewed distributions this layer serves produce.
pub const MAX_UNARY: u64 = 1 << 16;

/// Sequential, streaming bit-by-bit reads.
///
/// Bit order is fixed: most-significant bit first within each byte,
/// consistently across the cursors, every code, and
/// [`PackedArray`](crate::packed::PackedArray). A read of `n` bits returns
/// them right-aligned in a `u64`.
///
/// This trait specifies the basic operations over which codes are
/// implemented by traits such as [`GammaRead`](crate::codes::GammaRead).
pub trait BitRead: BitSeek {
    /// Read `n` bits (0 ≤ `n` ≤ 64) and return them in the lowest bits.
    ///
    /// Fails with [`Error::OutOfBoundsBits`] if fewer than `n` bits remain.
    /// Implementors should panic in test mode if `n` is greater than 64.
    fn read_bits(&mut self, n: usize) -> Result<u64>;

    /// Read a single bit.
    fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Look at the next bit without advancing; used by the codes to detect
    /// codeword terminators.
    fn peek_bit(&mut self) -> Result<bool>;

    /// Skip `n` bits.
    fn skip_bits(&mut self, n: usize) -> Result<()> {
        let pos = self.bit_pos();
        self.set_bit_pos(pos + n as u64)
    }

    /// Read a unary code: the count of one-bits before the terminating
    /// zero-bit.
    ///
    /// Fails with [`Error::CodewordOverflow`] if the run exceeds
    /// [`MAX_UNARY`].
    fn read_unary(&mut self) -> Result<u64> {
        let start = self.bit_pos();
        let mut n = 0;
        while self.read_bit()? {
            n += 1;
            if n > MAX_UNARY {
                return Err(Error::CodewordOverflow {
                    bit_pos: start,
                    max_bits: MAX_UNARY as usize + 1,
                });
            }
        }
        Ok(n)
    }
}

/// Sequential, streaming bit-by-bit writes.
///
/// Write methods return the number of bits written, so callers can account
/// for stream positions without consulting [`BitSeek`].
pub trait BitWrite: BitSeek {
    /// Write the lowest `n` bits of `value` (0 ≤ `n` ≤ 64) and return `n`.
    ///
    /// Bits of `value` above the lowest `n` are ignored. Fails with
    /// [`Error::OutOfBoundsBits`] if fewer than `n` bits of storage remain.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize>;

    /// Write `value` in unary: `value` one-bits and a terminating zero-bit.
    /// Returns `value + 1`.
    ///
    /// Fails with [`Error::EncodeOverflow`] if `value` exceeds
    /// [`MAX_UNARY`].
    fn write_unary(&mut self, value: u64) -> Result<usize> {
        if value > MAX_UNARY {
            return Err(Error::EncodeOverflow {
                value,
                max_bits: MAX_UNARY as usize + 1,
            });
        }
        let mut run = value;
        while run >= 64 {
            self.write_bits(u64::MAX, 64)?;
            run -= 64;
        }
        self.write_bits(((1 << run) - 1) << 1, run as usize + 1)?;
        Ok(value as usize + 1)
    }
}

/// Explicit repositioning for [`BitRead`] and [`BitWrite`] cursors.
pub trait BitSeek {
    /// Current position in bits from the start of the region.
    fn bit_pos(&self) -> u64;

    /// Move to `bit_pos`, which may be anywhere in `0..=length × 8`.
    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<()>;

    /// Advance to the next byte boundary, e.g. before switching to a raw
    /// byte copy. A no-op if already aligned.
    fn align(&mut self) -> Result<()> {
        let pos = self.bit_pos();
        self.set_bit_pos(pos.div_ceil(8) * 8)
    }
}
