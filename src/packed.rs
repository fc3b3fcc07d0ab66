/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Fixed-width bit-packed integer arrays.
//!
//! A [`PackedArray`] lays `count` elements of `width` bits each end to end
//! over a byte region, in the crate's MSB-first bit order: element `i`
//! occupies bits [`i·width`, `(i+1)·width`) of the region's bit address
//! space, so access is O(1) by arithmetic, unlike the sequential codes in
//! [`codes`](crate::codes). Use it for homogeneous fixed-width datasets
//! (suffix-array positions, per-base qualities) where random access
//! matters more than squeezing out the last bits.
//!
//! The backend is anything that dereferences to bytes — a slice handed out
//! by [`Storage::get`](crate::storage::Storage::get), a `Vec<u8>`, or a
//! mutable storage slice for writing — so a packed array written through a
//! read-write mapping is just reopened over the same file later.

use crate::impls::{BitReader, BitWriter};
use crate::traits::*;
use crate::{Error, Result};

/// A fixed-element-width integer array over a byte region.
#[derive(Debug)]
pub struct PackedArray<B> {
    data: B,
    width: u32,
    count: usize,
}

impl<B: AsRef<[u8]>> PackedArray<B> {
    /// Bind an array of `count` elements of `width` bits to `data`.
    ///
    /// Fails with [`Error::InsufficientStorage`] if
    /// ⌈`count`·`width`/8⌉ bytes exceed the region.
    ///
    /// # Panics
    ///
    /// If `width` is not in `1..=64`.
    pub fn new(data: B, width: u32, count: usize) -> Result<Self> {
        assert!((1..=64).contains(&width), "element width must be 1..=64");
        // A geometry whose bit count does not fit in a u64 cannot fit in
        // any region either.
        let needed = match (count as u64).checked_mul(width as u64) {
            Some(bits) => bits.div_ceil(8),
            None => u64::MAX,
        };
        let available = data.as_ref().len() as u64;
        if needed > available {
            return Err(Error::InsufficientStorage { needed, available });
        }
        Ok(Self { data, width, count })
    }

    /// The element at index `i`.
    pub fn get(&self, i: usize) -> Result<u64> {
        if i >= self.count {
            return Err(Error::OutOfBoundsIndex {
                index: i,
                count: self.count,
            });
        }
        let mut reader = BitReader::new(self.data.as_ref());
        reader.set_bit_pos(i as u64 * self.width as u64)?;
        reader.read_bits(self.width as usize)
    }

    /// Bits per element.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sequential iterator over all elements.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            reader: BitReader::new(self.data.as_ref()),
            width: self.width,
            remaining: self.count,
        }
    }

    /// Give back the underlying region.
    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PackedArray<B> {
    /// Store `value` at index `i`.
    ///
    /// A value wider than the element width is rejected with
    /// [`Error::ValueTooWide`]; silent truncation would corrupt a data
    /// layer invisibly.
    pub fn set(&mut self, i: usize, value: u64) -> Result<()> {
        if i >= self.count {
            return Err(Error::OutOfBoundsIndex {
                index: i,
                count: self.count,
            });
        }
        if self.width < 64 && value >> self.width != 0 {
            return Err(Error::ValueTooWide {
                value,
                width: self.width,
            });
        }
        let mut writer = BitWriter::new(self.data.as_mut());
        writer.set_bit_pos(i as u64 * self.width as u64)?;
        writer.write_bits(value, self.width as usize)?;
        Ok(())
    }
}

/// Iterator returned by [`PackedArray::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    reader: BitReader<'a>,
    width: u32,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // In bounds by the capacity check in PackedArray::new.
        self.reader.read_bits(self.width as usize).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_five() {
        let mut array = PackedArray::new(vec![0u8; 3], 5, 4).unwrap();
        array.set(0, 3).unwrap();
        array.set(1, 31).unwrap();
        array.set(2, 0).unwrap();
        array.set(3, 17).unwrap();

        assert_eq!(array.get(2).unwrap(), 0);
        assert_eq!(array.get(1).unwrap(), 31);
        assert_eq!(array.iter().collect::<Vec<_>>(), vec![3, 31, 0, 17]);
    }

    #[test]
    fn too_wide_values_are_rejected() {
        let mut array = PackedArray::new(vec![0u8; 8], 10, 5).unwrap();
        array.set(0, 1023).unwrap();
        assert!(matches!(
            array.set(1, 1024),
            Err(Error::ValueTooWide { value: 1024, width: 10 })
        ));
        // The rejected write must not have touched anything.
        assert_eq!(array.get(0).unwrap(), 1023);
        assert_eq!(array.get(1).unwrap(), 0);
    }

    #[test]
    fn out_of_range_index_fails() {
        let mut array = PackedArray::new(vec![0u8; 8], 3, 21).unwrap();
        assert!(matches!(
            array.get(21),
            Err(Error::OutOfBoundsIndex { index: 21, count: 21 })
        ));
        assert!(matches!(
            array.set(21, 0),
            Err(Error::OutOfBoundsIndex { .. })
        ));
    }

    #[test]
    fn storage_must_fit() {
        // 21 elements of 3 bits are 63 bits: 8 bytes suffice, 7 do not.
        assert!(PackedArray::new(vec![0u8; 7], 3, 21).is_err());
        assert!(PackedArray::new(vec![0u8; 8], 3, 21).is_ok());
    }

    #[test]
    fn absurd_element_counts_are_rejected() {
        // count · width overflows a u64; the geometry must be refused, not
        // wrapped into something that appears to fit.
        assert!(matches!(
            PackedArray::new(vec![0u8; 8], 64, usize::MAX),
            Err(Error::InsufficientStorage { .. })
        ));
    }

    #[test]
    fn cross_byte_width() {
        let values = [0x1_FFFF_FFFF, 0x1_0000_0000, 0xFFFF_FFFF, 0, 12345678];
        let mut array = PackedArray::new(vec![0u8; 21], 33, 5).unwrap();
        for (i, &v) in values.iter().enumerate() {
            array.set(i, v).unwrap();
        }
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(array.get(i).unwrap(), v);
        }
    }

    #[test]
    fn full_width_elements() {
        let mut array = PackedArray::new(vec![0u8; 16], 64, 2).unwrap();
        array.set(0, u64::MAX).unwrap();
        array.set(1, 0xDEAD_BEEF_CAFE_F00D).unwrap();
        assert_eq!(array.get(0).unwrap(), u64::MAX);
        assert_eq!(array.get(1).unwrap(), 0xDEAD_BEEF_CAFE_F00D);
    }
}
