/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::error::Error as StdError;

use bitstore::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// Fully qualified: the prelude glob brings in the crate's one-parameter
// Result alias, which would shadow the standard one here.
type TestResult = std::result::Result<(), Box<dyn StdError + Send + Sync + 'static>>;

/// set-then-get over every index and width, with values that exactly fit.
#[test]
fn set_get_all_widths() -> TestResult {
    let mut v = SmallRng::seed_from_u64(7);
    for width in 1..=64u32 {
        let count = 100;
        let mut array = PackedArray::new(vec![0u8; width as usize * count / 8 + 8], width, count)?;
        let max = if width == 64 { u64::MAX } else { (1 << width) - 1 };

        let values: Vec<u64> = (0..count)
            .map(|i| match i % 3 {
                0 => 0,
                1 => max,
                _ => v.random_range(0..=max),
            })
            .collect();
        for (i, &value) in values.iter().enumerate() {
            array.set(i, value)?;
        }
        for (i, &value) in values.iter().enumerate() {
            assert_eq!(array.get(i)?, value, "width {width}, index {i}");
        }
    }
    Ok(())
}

/// A packed array written through a read-write mapping is reopened over
/// the same file and read without any metadata of its own: element width
/// and count are the caller's contract.
#[test]
fn packed_array_over_mapped_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("qualities.bits");
    const WIDTH: u32 = 5;
    const COUNT: usize = 4;

    {
        let mut storage = Storage::create(&path, 3)?;
        let mut array = PackedArray::new(storage.get_mut(0, 0)?, WIDTH, COUNT)?;
        array.set(0, 3)?;
        array.set(1, 31)?;
        array.set(2, 0)?;
        array.set(3, 17)?;
        storage.flush()?;
    }

    let mut storage = Storage::open(&path, Mode::ReadOnly)?;
    let array = PackedArray::new(storage.get(0, 0)?, WIDTH, COUNT)?;
    assert_eq!(array.get(2)?, 0);
    assert_eq!(array.get(1)?, 31);
    assert_eq!(array.iter().collect::<Vec<_>>(), vec![3, 31, 0, 17]);
    Ok(())
}

/// Element layout must agree with the sequential bit cursors: element i
/// occupies bits [i·width, (i+1)·width) in MSB-first order.
#[test]
fn layout_matches_bit_cursor() -> TestResult {
    let mut array = PackedArray::new(vec![0u8; 8], 11, 5)?;
    for i in 0..5 {
        array.set(i, (i as u64 + 1) * 99)?;
    }
    let bytes = array.into_inner();

    let mut reader = BitReader::new(&bytes);
    for i in 0..5 {
        assert_eq!(reader.read_bits(11)?, (i as u64 + 1) * 99);
    }
    Ok(())
}

#[test]
fn creation_respects_storage_bounds() -> TestResult {
    let mut storage = Storage::from_vec(vec![0u8; 10]);
    // 16 elements of 5 bits are exactly 10 bytes.
    assert!(PackedArray::new(storage.get_mut(0, 0)?, 5, 16).is_ok());
    // One more element does not fit.
    let slice = storage.get_mut(0, 0)?;
    assert!(matches!(
        PackedArray::new(slice, 5, 17),
        Err(Error::InsufficientStorage {
            needed: 11,
            available: 10
        })
    ));
    Ok(())
}
