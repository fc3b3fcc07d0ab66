/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Fibonacci (Zeckendorf) code.
//!
//! Every integer `n` ≥ 1 has a unique representation as a sum of
//! non-consecutive Fibonacci numbers (Zeckendorf's theorem), taking
//! F₁ = 1, F₂ = 2, F₃ = 3, F₄ = 5, …. The codeword emits one bit per
//! Fibonacci index, ascending from F₁ up to the highest term used, and
//! closes with an extra one-bit: the highest term is always present, so
//! every codeword ends in `11` and no shorter codeword is a prefix of a
//! longer one. Unlike γ and δ, a single flipped bit cannot desynchronize
//! more than a couple of codewords, which matters for large on-disk count
//! tables.
//!
//! Zero is not in the domain; callers encode `n + 1` if zero must be
//! representable.
//!
//! # References
//!
//! Aviezri S. Fraenkel and Shmuel T. Klein, “Robust universal complete
//! codes for transmission and compression”. Discrete Applied Mathematics,
//! 64(1):31−55, January 1996.

use crate::traits::*;
use crate::{Error, Result};

/// Fibonacci numbers with F₁ = 1 and F₂ = 2; `FIB[i]` is Fᵢ₊₁. The last
/// entry is the largest Fibonacci number representable in a `u64`.
const FIB: [u64; 92] = fib_table();

const fn fib_table() -> [u64; 92] {
    let mut table = [0; 92];
    table[0] = 1;
    table[1] = 2;
    let mut i = 2;
    while i < 92 {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
}

/// Longest Fibonacci codeword: 92 Zeckendorf bits and the terminator.
const MAX_FIBONACCI: usize = 93;

/// Returns the length of the Fibonacci code for `n`.
///
/// # Panics
///
/// In debug mode, if `n` is zero.
#[must_use]
#[inline]
pub fn len_fibonacci(n: u64) -> usize {
    debug_assert!(n >= 1);
    FIB.partition_point(|&f| f <= n) + 1
}

/// Trait for reading Fibonacci codes.
pub trait FibonacciRead: BitRead {
    fn read_fibonacci(&mut self) -> Result<u64> {
        let start = self.bit_pos();
        let mut sum = 0;
        let mut prev = false;
        for idx in 0..MAX_FIBONACCI {
            let bit = self.read_bit()?;
            if bit && prev {
                return Ok(sum);
            }
            if bit {
                if idx >= FIB.len() {
                    break;
                }
                // Distinct non-consecutive terms sum to at most F₉₃ − 1,
                // so this cannot overflow even on corrupt input.
                sum += FIB[idx];
            }
            prev = bit;
        }
        Err(Error::CodewordOverflow {
            bit_pos: start,
            max_bits: MAX_FIBONACCI,
        })
    }
}

/// Trait for writing Fibonacci codes.
pub trait FibonacciWrite: BitWrite {
    fn write_fibonacci(&mut self, n: u64) -> Result<usize> {
        if n == 0 {
            return Err(Error::Domain {
                code: "Fibonacci",
                value: 0,
            });
        }
        // Number of Zeckendorf bits: index of the highest term, plus one.
        let m = FIB.partition_point(|&f| f <= n);
        let total = m + 1;

        // Assemble the codeword MSB-first: the bit for Fᵢ₊₁ lands at
        // position m − i, the terminator at position 0. The greedy
        // descending scan yields the Zeckendorf terms directly.
        let mut word: u128 = 1;
        let mut rest = n;
        for idx in (0..m).rev() {
            if FIB[idx] <= rest {
                rest -= FIB[idx];
                word |= 1 << (m - idx);
            }
        }
        debug_assert_eq!(rest, 0);

        if total <= 64 {
            self.write_bits(word as u64, total)?;
        } else {
            self.write_bits((word >> 64) as u64, total - 64)?;
            self.write_bits(word as u64, 64)?;
        }
        Ok(total)
    }
}

impl<B: BitRead> FibonacciRead for B {}
impl<B: BitWrite> FibonacciWrite for B {}
