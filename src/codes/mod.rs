/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

/*!

Traits for reading and writing self-delimiting integer codes.

Every code here is prefix-free: no codeword is a bit-for-bit prefix of
another codeword of the same code, so codewords of heterogeneous lengths
can be concatenated in one stream and decoded left to right without any
length metadata. The first few codewords, in the crate's fixed MSB-first
bit order, are:

| n | unary  |    γ    |    δ     | Fibonacci |
|---|-------:|--------:|---------:|----------:|
| 1 |     10 |       1 |        1 |        11 |
| 2 |    110 |     010 |     0100 |       011 |
| 3 |   1110 |     011 |     0101 |      0011 |
| 4 |  11110 |   00100 |   01100  |      1011 |
| 5 | 111110 |   00101 |   01101  |     00011 |

The unary code (and its generalization with a fixed-width remainder)
covers n ≥ 0 and lives directly on the core traits
[`BitRead`](crate::traits::BitRead) and
[`BitWrite`](crate::traits::BitWrite), since the γ and δ codes are built
from it. The γ, δ, and Fibonacci codes cover n ≥ 1 only: callers that
must represent zero encode n + 1, and that shift convention has to be
fixed once per file format because it affects every round trip. Encoding
0 directly fails with [`Error::Domain`](crate::Error::Domain) rather
than shifting silently.

Each code is implemented as a pair of traits for reading and writing
(e.g., [`GammaRead`] and [`GammaWrite`]) with blanket implementations
for every [`BitRead`](crate::traits::BitRead) and
[`BitWrite`](crate::traits::BitWrite), plus a `len_*` function returning
the codeword length in bits.

All decode loops are provably terminating: every code has a fixed
maximum codeword length, and a run past it reports
[`Error::CodewordOverflow`](crate::Error::CodewordOverflow) instead of
scanning an arbitrarily corrupt stream to the end of storage.

*/

pub mod gamma;
pub use gamma::{GammaRead, GammaWrite, len_gamma};

pub mod delta;
pub use delta::{DeltaRead, DeltaWrite, len_delta};

pub mod generalized_unary;
pub use generalized_unary::{GeneralizedUnaryRead, GeneralizedUnaryWrite, len_generalized_unary};

pub mod fibonacci;
pub use fibonacci::{FibonacciRead, FibonacciWrite, len_fibonacci};

/// Returns the length of the unary code for `n`.
#[must_use]
#[inline]
pub fn len_unary(n: u64) -> usize {
    n as usize + 1
}
