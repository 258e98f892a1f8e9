use std::fmt;

use num_bigint::BigUint;
use serde::ser::{Serialize, Serializer};

use crate::bitmask::Bitmask;
use crate::bits::all_ones;
use crate::config::{BitmaskOptions, Config, SetOptions};
use crate::error::{Error, Result};
use crate::operand::BitmaskInput;

/// A fixed, ordered universe of elements.
///
/// Position `i` of the universe is bit string position `i` of every bitmask
/// built from this set. The universe never changes after construction, so
/// bitmasks can borrow it for as long as they live.
#[derive(Debug, Clone)]
pub struct BitmaskSet<T> {
    elements: Vec<T>,
    options: SetOptions,
    bitmask_options: BitmaskOptions,
    ones: String,
    zeros: String,
    max: BigUint,
}

impl<T: PartialEq> BitmaskSet<T> {
    /// Build a set keeping the elements in the given order.
    ///
    /// Fails with [`Error::EmptyUniverse`] when `elements` is empty.
    pub fn new(elements: Vec<T>) -> Result<Self> {
        Self::build(elements, SetOptions::default(), BitmaskOptions::default())
    }

    fn build(
        elements: Vec<T>,
        options: SetOptions,
        bitmask_options: BitmaskOptions,
    ) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::EmptyUniverse);
        }

        let size = elements.len();
        tracing::debug!(size, sort = options.sort, "built bitmask set");

        Ok(Self {
            elements,
            options,
            bitmask_options,
            ones: "1".repeat(size),
            zeros: "0".repeat(size),
            max: all_ones(size),
        })
    }

    /// Number of elements in the universe; also the width of every bitmask.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn options(&self) -> SetOptions {
        self.options
    }

    /// Options handed to bitmasks built with [`BitmaskSet::bitmask`].
    pub fn bitmask_options(&self) -> BitmaskOptions {
        self.bitmask_options
    }

    /// Position of `element` in the universe, by linear scan.
    ///
    /// With duplicate elements the first position wins.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    /// `"111…1"`, the bit string of the whole universe.
    pub fn ones(&self) -> &str {
        &self.ones
    }

    /// `"000…0"`, the bit string of the empty subset.
    pub fn zeros(&self) -> &str {
        &self.zeros
    }

    /// The all-ones value, `2^size - 1`.
    pub fn max_value(&self) -> &BigUint {
        &self.max
    }
}

impl<T: Ord> BitmaskSet<T> {
    /// Build a set, sorting the universe first if `options.sort` is set.
    pub fn with_options(elements: Vec<T>, options: SetOptions) -> Result<Self> {
        Self::with_config(
            elements,
            &Config {
                set: options,
                bitmask: BitmaskOptions::default(),
            },
        )
    }

    /// Build a set from both halves of a [`Config`].
    pub fn with_config(mut elements: Vec<T>, config: &Config) -> Result<Self> {
        if config.set.sort {
            elements.sort();
        }
        Self::build(elements, config.set, config.bitmask)
    }
}

impl<T: PartialEq + Clone + fmt::Debug> BitmaskSet<T> {
    /// Build a bitmask of this set using the set's bitmask options.
    pub fn bitmask(&self, input: impl Into<BitmaskInput<T>>) -> Result<Bitmask<'_, T>> {
        Bitmask::with_options(self, input, self.bitmask_options)
    }

    /// Build a bitmask of this set with explicit options.
    pub fn bitmask_with(
        &self,
        input: impl Into<BitmaskInput<T>>,
        options: BitmaskOptions,
    ) -> Result<Bitmask<'_, T>> {
        Bitmask::with_options(self, input, options)
    }

    /// The bitmask with every element set.
    pub fn full(&self) -> Bitmask<'_, T> {
        Bitmask::from_value(self, self.max.clone())
    }

    /// The bitmask with no element set.
    pub fn empty(&self) -> Bitmask<'_, T> {
        Bitmask::from_value(self, BigUint::default())
    }
}

impl<T> fmt::Display for BitmaskSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ones)
    }
}

impl<T: Serialize> Serialize for BitmaskSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.elements.serialize(serializer)
    }
}
