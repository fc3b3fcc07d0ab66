/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Elias γ code.
//!
//! The γ code of an integer `n` ≥ 1 is `k` = ⌊log₂ `n`⌋ zero-bits, a
//! one-bit, and then the low `k` bits of `n`: the prefix gives the length
//! of the binary expansion, whose leading one-bit is implied. The codeword
//! is 2`k` + 1 bits long, so γ suits distributions concentrated on small
//! values, such as k-mer counts.
//!
//! Zero is not in the domain; callers encode `n + 1` if zero must be
//! representable.
//!
//! # References
//!
//! Peter Elias, “Universal codeword sets and representations of the
//! integers”. IEEE Transactions on Information Theory, 21(2):194−203,
//! March 1975.

use crate::traits::*;
use crate::{Error, Result};

/// Longest γ codeword: 63 zeros, the marker, and 63 remainder bits.
const MAX_GAMMA: usize = 127;

/// Returns the length of the γ code for `n`.
///
/// # Panics
///
/// In debug mode, if `n` is zero.
#[must_use]
#[inline]
pub fn len_gamma(n: u64) -> usize {
    debug_assert!(n >= 1);
    2 * n.ilog2() as usize + 1
}

/// Reads the zero-run prefix of a γ codeword, capped so decoding corrupt
/// data cannot scan unboundedly.
fn read_len_prefix<B: BitRead + ?Sized>(backend: &mut B) -> Result<u32> {
    let start = backend.bit_pos();
    let mut k = 0;
    while !backend.read_bit()? {
        k += 1;
        if k > 63 {
            return Err(Error::CodewordOverflow {
                bit_pos: start,
                max_bits: MAX_GAMMA,
            });
        }
    }
    Ok(k)
}

/// Trait for reading γ codes.
pub trait GammaRead: BitRead {
    #[inline]
    fn read_gamma(&mut self) -> Result<u64> {
        let k = read_len_prefix(self)?;
        if k == 0 {
            return Ok(1);
        }
        Ok(1 << k | self.read_bits(k as usize)?)
    }

    #[inline]
    fn skip_gamma(&mut self) -> Result<()> {
        let k = read_len_prefix(self)?;
        self.skip_bits(k as usize)
    }
}

/// Trait for writing γ codes.
pub trait GammaWrite: BitWrite {
    #[inline]
    fn write_gamma(&mut self, n: u64) -> Result<usize> {
        if n == 0 {
            return Err(Error::Domain {
                code: "gamma",
                value: 0,
            });
        }
        let k = n.ilog2();
        // k zeros and the marker bit in one write: the value 1 in k + 1 bits.
        self.write_bits(1, k as usize + 1)?;
        self.write_bits(n ^ 1 << k, k as usize)?;
        Ok(2 * k as usize + 1)
    }
}

impl<B: BitRead> GammaRead for B {}
impl<B: BitWrite> GammaWrite for B {}
