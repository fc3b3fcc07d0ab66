/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use crate::traits::*;
use crate::{Error, Result};

/// A bit-granularity write cursor over a mutable byte slice.
///
/// Bits are written most-significant first within each byte; bits outside
/// the written range are left untouched, so disjoint ranges of the same
/// region can be filled by independent writers. Writes land directly in
/// the slice — there is no internal buffer and nothing to flush.
#[derive(Debug)]
pub struct BitWriter<'a> {
    data: &'a mut [u8],
    bit_pos: u64,
}

impl<'a> BitWriter<'a> {
    /// A writer positioned at the first bit of `data`.
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Total number of bits in the underlying slice.
    pub fn bit_len(&self) -> u64 {
        self.data.len() as u64 * 8
    }
}

impl BitWrite for BitWriter<'_> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        assert!(n <= 64);
        if n == 0 {
            return Ok(0);
        }
        if self.bit_pos + n as u64 > self.bit_len() {
            return Err(Error::OutOfBoundsBits {
                bit_pos: self.bit_pos,
                n_bits: n as u64,
                bit_size: self.bit_len(),
            });
        }

        let mut pos = self.bit_pos as usize;
        let mut remaining = n;
        while remaining > 0 {
            let avail = 8 - pos % 8;
            let take = avail.min(remaining);
            let shift = avail - take;
            let chunk = ((value >> (remaining - take)) & ((1 << take) - 1)) as u8;
            let mask = (((1u16 << take) - 1) as u8) << shift;
            let byte = &mut self.data[pos / 8];
            *byte = (*byte & !mask) | (chunk << shift);
            pos += take;
            remaining -= take;
        }
        self.bit_pos = pos as u64;
        Ok(n)
    }
}

impl BitSeek for BitWriter<'_> {
    fn bit_pos(&self) -> u64 {
        self.bit_pos
    }

    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<()> {
        if bit_pos > self.bit_len() {
            return Err(Error::OutOfBoundsBits {
                bit_pos,
                n_bits: 0,
                bit_size: self.bit_len(),
            });
        }
        self.bit_pos = bit_pos;
        Ok(())
    }
}
