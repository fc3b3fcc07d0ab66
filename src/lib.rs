/*
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

#![doc = include_str!("../README.md")]

pub mod codes;
pub mod impls;
pub mod packed;
pub mod storage;
pub mod traits;

mod error;
pub use error::{Error, Result};

/// Prelude module to import everything from this crate
pub mod prelude {
    pub use crate::codes::*;
    pub use crate::error::{Error, Result};
    pub use crate::impls::*;
    pub use crate::packed::*;
    pub use crate::storage::*;
    pub use crate::traits::*;
}
