/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! The crate-wide error type.
//!
//! Every fallible operation in this crate returns [`Result`]. Errors are
//! plain values: the library never prints and never terminates the process.
//! Callers that want the traditional batch-tool behavior of a fatal
//! diagnostic can use [`Error::die`] at the outermost level.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways the storage layer, the bit cursors, the codes, and the
/// packed array can fail.
///
/// Storage-layer variants ([`Open`](Error::Open), [`Stat`](Error::Stat),
/// [`EmptyFile`](Error::EmptyFile), [`Map`](Error::Map)) are unrecoverable
/// by construction: the mapped resource never came into existence. The
/// out-of-bounds variants are always caller logic errors, never transient
/// conditions, and the overflow variants are always data-modeling errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The backing file could not be opened.
    #[error("cannot open '{}' for mapping: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The size of the backing file could not be determined.
    #[error("cannot stat '{}' for mapping: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A zero-length file cannot be usefully mapped.
    #[error("file '{}' is empty, cannot map", .path.display())]
    EmptyFile { path: PathBuf },

    /// The mapping syscall itself failed.
    #[error("cannot map '{}' of length {length}: {source}", .path.display())]
    Map {
        path: PathBuf,
        length: u64,
        #[source]
        source: std::io::Error,
    },

    /// Modified pages could not be synchronized to the backing file.
    #[error("cannot sync '{}': {source}", .path.display())]
    Sync {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mutable access was requested on a read-only mapping.
    #[error("storage mapped read-only from '{}' cannot be written", .path.display())]
    ReadOnlyStorage { path: PathBuf },

    /// A byte access past the end of the storage region.
    #[error("requested {len} bytes at position {offset}, but only {size} bytes in storage")]
    OutOfBounds { offset: u64, len: u64, size: u64 },

    /// A bit access past the end of the storage region.
    #[error("requested {n_bits} bits at bit position {bit_pos}, but only {bit_size} bits in storage")]
    OutOfBoundsBits {
        bit_pos: u64,
        n_bits: u64,
        bit_size: u64,
    },

    /// A packed-array access past the last element.
    #[error("index {index} out of bounds for packed array of {count} elements")]
    OutOfBoundsIndex { index: usize, count: usize },

    /// A value outside the domain of a code (0 for the γ, δ, and Fibonacci
    /// codes; callers encode n + 1 if zero must be representable).
    #[error("value {value} is outside the domain of the {code} code")]
    Domain { code: &'static str, value: u64 },

    /// Encoding a value would exceed the maximum codeword length.
    #[error("value {value} cannot be encoded: codeword would exceed {max_bits} bits")]
    EncodeOverflow { value: u64, max_bits: usize },

    /// A codeword being decoded exceeds the maximum codeword length; the
    /// stream is corrupt or was written with a different discipline.
    #[error("codeword at bit position {bit_pos} exceeds {max_bits} bits")]
    CodewordOverflow { bit_pos: u64, max_bits: usize },

    /// A value does not fit in the element width of a packed array.
    #[error("value {value} does not fit in {width} bits")]
    ValueTooWide { value: u64, width: u32 },

    /// A packed array does not fit in the storage region it was given.
    #[error("packed array needs {needed} bytes, but only {available} bytes of storage given")]
    InsufficientStorage { needed: u64, available: u64 },
}

impl Error {
    /// Write the diagnostic to standard error and terminate the process
    /// with a non-zero exit status.
    ///
    /// This is the fail-fast default of the batch tools this layer serves:
    /// a corrupt input or an out-of-range access is not something they
    /// should paper over. Only the outermost caller should use it; library
    /// code propagates errors with `?`.
    pub fn die(&self) -> ! {
        eprintln!("bitstore: {self}");
        std::process::exit(1);
    }
}
