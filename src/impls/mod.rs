/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Concrete bit cursors over byte slices.
//!
//! [`BitReader`] and [`BitWriter`] operate directly on slices handed out by
//! [`Storage::get`](crate::storage::Storage::get) and
//! [`Storage::get_mut`](crate::storage::Storage::get_mut); the borrow
//! checker guarantees neither outlives the storage region it reads from.
//! Both address bits most-significant first within each byte, and both are
//! unbuffered: a cursor is just a slice and a bit position, so independent
//! cursors over disjoint ranges of the same region are cheap.

mod bit_reader;
pub use bit_reader::BitReader;

mod bit_writer;
pub use bit_writer::BitWriter;
