//! Set membership over a fixed universe, backed by arbitrary precision
//! bitmasks.
//!
//! A [`BitmaskSet`] fixes an ordered universe of elements. Each [`Bitmask`]
//! built from it is an immutable subset of that universe: bit string
//! position `i` (and bit `size - 1 - i` of the integer value) says whether
//! the set's `i`-th element is a member.
//!
//! ```
//! use bitmask_set::BitmaskSet;
//!
//! let set = BitmaskSet::new(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9])?;
//! let a = set.bitmask([2, 4, 5, 6, 9])?;
//! let b = set.bitmask([1, 2, 3, 4, 5])?;
//!
//! assert_eq!(a.as_str(), "0010111001");
//! assert_eq!(a.invert().as_str(), "1101000110");
//! assert_eq!(a.and(&b).elements(), [2, 4, 5]);
//! assert!(a.and(&b).is_in(&a));
//! # Ok::<(), bitmask_set::Error>(())
//! ```

mod bitmask;
mod bits;
mod config;
mod error;
mod json;
mod operand;
mod set;

#[cfg(test)]
mod tests_bitmask;

pub use bitmask::Bitmask;
pub use config::{BitmaskOptions, Config, ConfigError, SetOptions};
pub use error::{Error, Length, Result};
pub use num_bigint::BigUint;
pub use operand::{BitmaskInput, Operand, Operation};
pub use set::BitmaskSet;
