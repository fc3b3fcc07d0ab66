/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Traits for bit-granularity access to a storage region.
//!
//! [`BitRead`] and [`BitWrite`] are the seams the codes in
//! [`codes`](crate::codes) are written against; [`BitSeek`] adds explicit
//! repositioning for random restarts of sequential decoding. The concrete
//! cursors live in [`impls`](crate::impls).

mod bits;
pub use bits::*;
