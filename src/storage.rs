/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Byte-addressable storage regions, optionally backed by a memory-mapped
//! file.
//!
//! A [`Storage`] owns a region of fixed length and hands out bounds-checked
//! slices into it. The region is either an in-memory buffer or an entire
//! file mapped into the address space: partial mappings are restricted to
//! page-aligned offsets on most platforms, so the whole file is mapped once
//! and every access goes through the single bounds check in
//! [`get`](Storage::get). Everything above this layer — the bit cursors in
//! [`impls`](crate::impls), the codes, the packed array — routes through
//! that check rather than computing raw addresses itself.
//!
//! # Concurrency
//!
//! There is no internal locking anywhere in this crate. A read-only
//! `Storage` may be shared among readers freely; the page cache serializes
//! concurrent faults and the mapped pages are never mutated. A read-write
//! `Storage` is single-writer by contract: concurrent writers over
//! overlapping regions produce undefined contents and must be serialized by
//! the caller. Independent cursors over disjoint ranges of the same
//! writable region are safe.
//!
//! # Durability
//!
//! A read-write mapping is synchronized to the backing file by
//! [`flush`](Storage::flush), and again on drop, so modifications reach the
//! file on every exit path. The mapped region cannot be grown: the backing
//! file must already exist at its final size (see
//! [`create`](Storage::create)). Mapping a file may block on disk I/O, and
//! later accesses may transparently fault and block on page-in; there is no
//! timeout or cancellation for these stalls.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use memmap2::{Mmap, MmapMut, MmapOptions};

use crate::{Error, Result};

/// Whether a [`Storage`] was opened for reading only or for reading and
/// writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only, private mapping; populated eagerly where the platform
    /// supports it.
    ReadOnly,
    /// Read-write, shared mapping; writes are visible to the backing file.
    ReadWrite,
}

#[derive(Debug)]
enum Backing {
    Mapped(Mmap),
    MappedMut(MmapMut),
    Owned(Vec<u8>),
}

/// A fixed-length, byte-addressable storage region with a movable cursor.
///
/// The length never changes after construction. Every access is checked
/// against it: [`get`](Storage::get) either returns a slice entirely inside
/// the region or fails with [`Error::OutOfBounds`].
#[derive(Debug)]
pub struct Storage {
    backing: Backing,
    path: Option<PathBuf>,
    cursor: usize,
}

impl Storage {
    /// Map the named file in its entirety.
    ///
    /// [`Mode::ReadOnly`] maps the file read-only and private;
    /// [`Mode::ReadWrite`] maps it read-write and shared, so writes reach
    /// the backing file. The file must be non-empty.
    pub fn open<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Self> {
        let path = path.as_ref();
        let file = match mode {
            Mode::ReadOnly => File::open(path),
            Mode::ReadWrite => OpenOptions::new().read(true).write(true).open(path),
        }
        .map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?;

        let length = file
            .metadata()
            .map_err(|source| Error::Stat {
                path: path.to_owned(),
                source,
            })?
            .len();

        if length == 0 {
            return Err(Error::EmptyFile {
                path: path.to_owned(),
            });
        }

        let backing = match mode {
            Mode::ReadOnly => {
                let mut options = MmapOptions::new();
                #[cfg(target_os = "linux")]
                options.populate();
                // SAFETY: the mapping is private and the file handle is
                // dropped right after; truncation of the file by another
                // process while mapped is outside our contract.
                let map = unsafe { options.map(&file) }.map_err(|source| Error::Map {
                    path: path.to_owned(),
                    length,
                    source,
                })?;
                Backing::Mapped(map)
            }
            Mode::ReadWrite => {
                // SAFETY: as above; single-writer contract documented at
                // the module level.
                let map = unsafe { MmapOptions::new().map_mut(&file) }.map_err(|source| {
                    Error::Map {
                        path: path.to_owned(),
                        length,
                        source,
                    }
                })?;
                Backing::MappedMut(map)
            }
        };

        Ok(Self {
            backing,
            path: Some(path.to_owned()),
            cursor: 0,
        })
    }

    /// Create (or truncate) the named file at exactly `length` bytes and
    /// map it read-write.
    ///
    /// A mapped region cannot be grown, so a file that will be written
    /// through this layer must exist at its final size before mapping;
    /// this constructor takes care of that.
    pub fn create<P: AsRef<Path>>(path: P, length: u64) -> Result<Self> {
        let path = path.as_ref();

        if length == 0 {
            return Err(Error::EmptyFile {
                path: path.to_owned(),
            });
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|source| Error::Open {
                path: path.to_owned(),
                source,
            })?;

        file.set_len(length).map_err(|source| Error::Stat {
            path: path.to_owned(),
            source,
        })?;

        // SAFETY: see `open`.
        let map = unsafe { MmapOptions::new().map_mut(&file) }.map_err(|source| Error::Map {
            path: path.to_owned(),
            length,
            source,
        })?;

        Ok(Self {
            backing: Backing::MappedMut(map),
            path: Some(path.to_owned()),
            cursor: 0,
        })
    }

    /// Wrap a pre-allocated in-memory buffer. The buffer is always
    /// writable; its length is fixed for the lifetime of the storage.
    pub fn from_vec(buf: Vec<u8>) -> Self {
        Self {
            backing: Backing::Owned(buf),
            path: None,
            cursor: 0,
        }
    }

    /// A zero-filled in-memory region of `length` bytes.
    pub fn anon(length: usize) -> Self {
        Self::from_vec(vec![0; length])
    }

    fn bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(map) => map,
            Backing::MappedMut(map) => map,
            Backing::Owned(buf) => buf,
        }
    }

    /// Length of the region in bytes, fixed at construction.
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// True if the region is empty (possible only for buffer-backed
    /// storage; mapped files are never empty).
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// The mode the region was opened with. Buffer-backed storage is
    /// always [`Mode::ReadWrite`].
    pub fn mode(&self) -> Mode {
        match self.backing {
            Backing::Mapped(_) => Mode::ReadOnly,
            _ => Mode::ReadWrite,
        }
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current cursor position in bytes.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `offset`.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        let size = self.len();
        if offset > size {
            return Err(Error::OutOfBounds {
                offset: offset as u64,
                len: 0,
                size: size as u64,
            });
        }
        self.cursor = offset;
        Ok(())
    }

    /// Resolves the `len == 0` convention ("to end of region") and checks
    /// `offset + len <= size`. This is the single bounds chokepoint.
    fn checked_range(&self, offset: usize, len: usize) -> Result<(usize, usize)> {
        let size = self.len();
        let oob = || Error::OutOfBounds {
            offset: offset as u64,
            len: len as u64,
            size: size as u64,
        };
        let len = if len == 0 {
            size.checked_sub(offset).ok_or_else(oob)?
        } else {
            len
        };
        let end = offset.checked_add(len).ok_or_else(oob)?;
        if end > size {
            return Err(oob());
        }
        Ok((offset, end))
    }

    /// A slice of `len` bytes starting at `offset`; `len == 0` means "to
    /// end of region". Advances the cursor to `offset + len`.
    pub fn get(&mut self, offset: usize, len: usize) -> Result<&[u8]> {
        let (start, end) = self.checked_range(offset, len)?;
        self.cursor = end;
        Ok(&self.bytes()[start..end])
    }

    /// Sequential form of [`get`](Storage::get): a slice of `len` bytes
    /// starting at the cursor.
    pub fn get_next(&mut self, len: usize) -> Result<&[u8]> {
        self.get(self.cursor, len)
    }

    /// Mutable counterpart of [`get`](Storage::get). Fails with
    /// [`Error::ReadOnlyStorage`] on a read-only mapping.
    pub fn get_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8]> {
        if let Backing::Mapped(_) = self.backing {
            return Err(Error::ReadOnlyStorage {
                path: self.path.clone().unwrap_or_default(),
            });
        }
        let (start, end) = self.checked_range(offset, len)?;
        self.cursor = end;
        match &mut self.backing {
            Backing::MappedMut(map) => Ok(&mut map[start..end]),
            Backing::Owned(buf) => Ok(&mut buf[start..end]),
            Backing::Mapped(_) => unreachable!(),
        }
    }

    /// Sequential form of [`get_mut`](Storage::get_mut).
    pub fn get_next_mut(&mut self, len: usize) -> Result<&mut [u8]> {
        self.get_mut(self.cursor, len)
    }

    /// Synchronously flush all modified pages to the backing file.
    ///
    /// A no-op for read-only mappings and in-memory buffers. Called again
    /// on drop, but a caller that needs the durability guarantee should
    /// call it explicitly and check the result.
    pub fn flush(&self) -> Result<()> {
        if let Backing::MappedMut(map) = &self.backing {
            map.flush().map_err(|source| Error::Sync {
                path: self.path.clone().unwrap_or_default(),
                source,
            })?;
        }
        Ok(())
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        // Best-effort: the explicit flush path reports errors.
        if let Backing::MappedMut(map) = &self.backing {
            let _ = map.flush();
        }
    }
}
