/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use crate::traits::*;
use crate::{Error, Result};

/// A bit-granularity read cursor over a byte slice.
///
/// Bits are consumed most-significant first within each byte. The position
/// is monotonically non-decreasing during a sequential pass unless
/// explicitly rewound through [`BitSeek`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: u64,
}

impl<'a> BitReader<'a> {
    /// A reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Total number of bits in the underlying slice.
    pub fn bit_len(&self) -> u64 {
        self.data.len() as u64 * 8
    }

    fn check_remaining(&self, n: usize) -> Result<()> {
        if self.bit_pos + n as u64 > self.bit_len() {
            return Err(Error::OutOfBoundsBits {
                bit_pos: self.bit_pos,
                n_bits: n as u64,
                bit_size: self.bit_len(),
            });
        }
        Ok(())
    }
}

impl BitRead for BitReader<'_> {
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        assert!(n <= 64);
        if n == 0 {
            return Ok(0);
        }
        self.check_remaining(n)?;

        let mut pos = self.bit_pos as usize;
        let mut remaining = n;
        let mut res = 0;
        while remaining > 0 {
            let byte = self.data[pos / 8] as u64;
            let avail = 8 - pos % 8;
            let take = avail.min(remaining);
            let chunk = (byte >> (avail - take)) & ((1 << take) - 1);
            res = (res << take) | chunk;
            pos += take;
            remaining -= take;
        }
        self.bit_pos = pos as u64;
        Ok(res)
    }

    fn peek_bit(&mut self) -> Result<bool> {
        self.check_remaining(1)?;
        let byte = self.data[(self.bit_pos / 8) as usize];
        Ok((byte >> (7 - self.bit_pos % 8)) & 1 != 0)
    }

    // Scans for the terminating zero-bit a byte at a time instead of going
    // through read_bit.
    fn read_unary(&mut self) -> Result<u64> {
        let start = self.bit_pos;
        let bit_len = self.bit_len();
        let mut pos = self.bit_pos;
        let mut run = 0;
        loop {
            if pos >= bit_len {
                return Err(Error::OutOfBoundsBits {
                    bit_pos: start,
                    n_bits: run + 1,
                    bit_size: bit_len,
                });
            }
            if run > MAX_UNARY {
                return Err(Error::CodewordOverflow {
                    bit_pos: start,
                    max_bits: MAX_UNARY as usize + 1,
                });
            }
            let used = (pos % 8) as u32;
            let avail = 8 - used;
            // Left-align the unconsumed bits of the byte in a u32; the
            // low zero padding stops leading_ones at the byte boundary.
            let window = (self.data[(pos / 8) as usize] as u32) << (24 + used);
            let ones = window.leading_ones().min(avail);
            if ones < avail {
                let total = run + ones as u64;
                if total > MAX_UNARY {
                    return Err(Error::CodewordOverflow {
                        bit_pos: start,
                        max_bits: MAX_UNARY as usize + 1,
                    });
                }
                self.bit_pos = pos + ones as u64 + 1;
                return Ok(total);
            }
            run += avail as u64;
            pos += avail as u64;
        }
    }
}

impl BitSeek for BitReader<'_> {
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
