use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Not, Sub};
use std::sync::OnceLock;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::ser::{Serialize, Serializer};

use crate::bits::{bit_of, check_width, parse_digits, to_padded_string};
use crate::config::BitmaskOptions;
use crate::error::{Error, Result};
use crate::operand::{BitmaskInput, Operand};
use crate::set::BitmaskSet;

/// An immutable subset of a [`BitmaskSet`]'s universe.
///
/// The subset is held twice, as a fixed-width bit string and as the integer
/// it spells in base 2; both always have exactly `set.size()` bits. Every
/// operation returns a new bitmask.
///
/// Member elements are decoded lazily: operations stay in the integer
/// domain, and [`Bitmask::elements`] decodes once and caches the result.
///
/// Binary operations assume both operands come from the same set. This is
/// checked with a debug assertion on the set sizes only.
#[derive(Clone, Debug)]
pub struct Bitmask<'a, T> {
    set: &'a BitmaskSet<T>,
    bits: String,
    value: BigUint,
    decoded: OnceLock<Vec<T>>,
}

impl<'a, T: PartialEq + Clone + fmt::Debug> Bitmask<'a, T> {
    /// Build a bitmask of `set` using the set's bitmask options.
    pub fn new(set: &'a BitmaskSet<T>, input: impl Into<BitmaskInput<T>>) -> Result<Self> {
        Self::with_options(set, input, set.bitmask_options())
    }

    /// Build a bitmask of `set`.
    ///
    /// - Elements: every element must belong to `set`, otherwise
    ///   [`Error::ElementNotFound`]. Input order and duplicates do not
    ///   matter; bit positions always follow the set.
    /// - Bits: fails with [`Error::TooManyBits`] if the value needs more than
    ///   `set.size()` bits.
    /// - Digits: fails with [`Error::EmptyInput`], [`Error::LengthMismatch`]
    ///   or [`Error::InvalidCharacter`], checked in that order.
    pub fn with_options(
        set: &'a BitmaskSet<T>,
        input: impl Into<BitmaskInput<T>>,
        options: BitmaskOptions,
    ) -> Result<Self> {
        let sort = options.resolve(&set.options());

        match input.into() {
            // Bit positions come from the set, so sorting the input cannot
            // change the result and decoding is already in set order.
            BitmaskInput::Elements(elements) => Self::from_elements(set, &elements),
            BitmaskInput::Bits(value) => {
                if sort {
                    tracing::warn!(
                        "element sorting is not available when building a bitmask from bits"
                    );
                }

                check_width(&value, set.size())?;
                Ok(Self::from_value(set, value))
            }
            BitmaskInput::Digits(digits) => {
                if sort {
                    tracing::warn!(
                        "element sorting is not available when building a bitmask from a string"
                    );
                }

                let value = parse_digits(&digits, set.size())?;
                Ok(Self::assemble(set, digits, value))
            }
        }
    }

    fn from_elements(set: &'a BitmaskSet<T>, elements: &[T]) -> Result<Self> {
        let width = set.size();
        let mut value = BigUint::zero();

        for (position, element) in elements.iter().enumerate() {
            let index = set
                .index_of(element)
                .ok_or_else(|| Error::ElementNotFound {
                    position,
                    element: format!("{element:?}"),
                })?;
            value.set_bit(bit_of(index, width), true);
        }

        Ok(Self::from_value(set, value))
    }

    /// Wrap a value already known to fit the set's width.
    pub(crate) fn from_value(set: &'a BitmaskSet<T>, value: BigUint) -> Self {
        let bits = to_padded_string(&value, set.size());
        Self::assemble(set, bits, value)
    }

    fn assemble(set: &'a BitmaskSet<T>, bits: String, value: BigUint) -> Self {
        debug_assert_eq!(bits.len(), set.size());
        Self {
            set,
            bits,
            value,
            decoded: OnceLock::new(),
        }
    }

    /// A new bitmask of the same set from a derived value.
    ///
    /// Masking keeps the width invariant even if the same-set precondition
    /// was broken in a release build.
    fn derive(&self, value: BigUint) -> Self {
        Self::from_value(self.set, value & self.set.max_value())
    }

    fn check_same_set(&self, other: &Self) {
        debug_assert_eq!(
            self.set.size(),
            other.set.size(),
            "set size mismatch: {} vs {}",
            self.set.size(),
            other.set.size()
        );
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Whether `element` is a member.
    ///
    /// Elements foreign to the set are never members. This is not an error:
    /// membership is only meaningful for elements of the universe.
    pub fn includes(&self, element: &T) -> bool {
        match self.set.index_of(element) {
            Some(index) => self.value.bit(bit_of(index, self.set.size())),
            None => false,
        }
    }

    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.set.index_of(element)
    }

    /// The set this bitmask was built from.
    pub fn set(&self) -> &'a BitmaskSet<T> {
        self.set
    }

    /// Number of members, counted without decoding.
    pub fn len(&self) -> u64 {
        self.value.count_ones()
    }

    // ── Representations ──────────────────────────────────────────────

    /// The fixed-width bit string; position `i` is element `i` of the set.
    pub fn as_str(&self) -> &str {
        &self.bits
    }

    pub fn to_biguint(&self) -> BigUint {
        self.value.clone()
    }

    // ── Bitwise operations ───────────────────────────────────────────

    /// Members of both.
    pub fn and(&self, other: &Self) -> Self {
        self.check_same_set(other);
        self.derive(&self.value & &other.value)
    }

    /// Members of either.
    pub fn or(&self, other: &Self) -> Self {
        self.check_same_set(other);
        self.derive(&self.value | &other.value)
    }

    /// Members of exactly one.
    pub fn xor(&self, other: &Self) -> Self {
        self.check_same_set(other);
        self.derive(&self.value ^ &other.value)
    }

    /// The complement within the universe.
    pub fn invert(&self) -> Self {
        // XOR with all ones; a plain NOT has no fixed width to flip within.
        self.derive(&self.value ^ self.set.max_value())
    }

    // ── Operations over elements or bitmasks ─────────────────────────

    fn with_operand<'o>(
        &self,
        operand: Operand<'o, 'a, T>,
        op: impl FnOnce(&Self, &Self) -> Self,
    ) -> Result<Self>
    where
        'a: 'o,
    {
        match operand {
            Operand::Elements(elements) => {
                let other = Self::from_elements(self.set, &elements)?;
                Ok(op(self, &other))
            }
            Operand::Bitmask(other) => Ok(op(self, other)),
        }
    }

    /// Union with elements or another bitmask.
    pub fn add<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.with_operand(operand.into(), Self::or)
    }

    /// Same as [`Bitmask::add`].
    pub fn include<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.add(operand)
    }

    /// Same as [`Bitmask::add`].
    pub fn union<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.add(operand)
    }

    /// Members of `self` that are not in the operand.
    pub fn remove<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.with_operand(operand.into(), |this, other| this.and(&other.invert()))
    }

    /// Same as [`Bitmask::remove`].
    pub fn exclude<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.remove(operand)
    }

    /// Symmetric difference with elements or another bitmask.
    pub fn distinct<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.with_operand(operand.into(), Self::xor)
    }

    /// Same as [`Bitmask::distinct`].
    pub fn unlike<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.distinct(operand)
    }

    /// Same as [`Bitmask::distinct`].
    pub fn different<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.distinct(operand)
    }

    /// Intersection with elements or another bitmask.
    pub fn intersection<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.with_operand(operand.into(), Self::and)
    }

    /// Same as [`Bitmask::intersection`].
    pub fn intersect<'o>(&self, operand: impl Into<Operand<'o, 'a, T>>) -> Result<Self>
    where
        'a: 'o,
    {
        self.intersection(operand)
    }

    // ── Predicates ───────────────────────────────────────────────────

    /// Whether every member of `self` is also a member of `other`.
    ///
    /// The empty bitmask is in everything, itself included.
    pub fn is_in(&self, other: &Self) -> bool {
        self.check_same_set(other);
        (&self.value & &other.value) == self.value
    }

    pub fn is_not_in(&self, other: &Self) -> bool {
        !self.is_in(other)
    }

    pub fn is_full(&self) -> bool {
        &self.value == self.set.max_value()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_zero()
    }

    /// Same as [`Bitmask::is_empty`].
    pub fn is_zero(&self) -> bool {
        self.is_empty()
    }

    // ── Decoding ─────────────────────────────────────────────────────

    fn decode(&self) -> Vec<T> {
        tracing::trace!(bits = %self.bits, "decoding bitmask elements");
        self.bits
            .bytes()
            .zip(self.set.elements())
            .filter(|(bit, _)| *bit == b'1')
            .map(|(_, element)| element.clone())
            .collect()
    }

    /// Decode the member elements now, replacing any cached decode.
    pub fn compute_elements(&mut self) -> &[T] {
        self.decoded = OnceLock::from(self.decode());
        self.decoded.get().map(Vec::as_slice).unwrap_or_default()
    }

    /// Member elements in set order, decoded on first use and cached.
    pub fn elements(&self) -> &[T] {
        self.decoded.get_or_init(|| self.decode())
    }

    /// Whether the member elements have been decoded yet.
    pub fn is_computed(&self) -> bool {
        self.decoded.get().is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements().iter()
    }
}

impl<'b, T: PartialEq + Clone + fmt::Debug> IntoIterator for &'b Bitmask<'_, T> {
    type Item = &'b T;
    type IntoIter = std::slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> PartialEq for Bitmask<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<T> Eq for Bitmask<'_, T> {}

impl<T> PartialEq<str> for Bitmask<'_, T> {
    fn eq(&self, other: &str) -> bool {
        self.bits == other
    }
}

impl<T> PartialEq<&str> for Bitmask<'_, T> {
    fn eq(&self, other: &&str) -> bool {
        self.bits == *other
    }
}

impl<T> Hash for Bitmask<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.hash(state);
    }
}

impl<T> fmt::Display for Bitmask<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

impl<T> Serialize for Bitmask<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bits)
    }
}

impl<'a, T: PartialEq + Clone + fmt::Debug> BitAnd for &Bitmask<'a, T> {
    type Output = Bitmask<'a, T>;

    fn bitand(self, rhs: Self) -> Bitmask<'a, T> {
        self.and(rhs)
    }
}

impl<'a, T: PartialEq + Clone + fmt::Debug> BitOr for &Bitmask<'a, T> {
    type Output = Bitmask<'a, T>;

    fn bitor(self, rhs: Self) -> Bitmask<'a, T> {
        self.or(rhs)
    }
}

impl<'a, T: PartialEq + Clone + fmt::Debug> BitXor for &Bitmask<'a, T> {
    type Output = Bitmask<'a, T>;

    fn bitxor(self, rhs: Self) -> Bitmask<'a, T> {
        self.xor(rhs)
    }
}

impl<'a, T: PartialEq + Clone + fmt::Debug> Sub for &Bitmask<'a, T> {
    type Output = Bitmask<'a, T>;

    /// Difference: `self AND NOT rhs`.
    fn sub(self, rhs: Self) -> Bitmask<'a, T> {
        self.and(&rhs.invert())
    }
}

impl<'a, T: PartialEq + Clone + fmt::Debug> Not for &Bitmask<'a, T> {
    type Output = Bitmask<'a, T>;

    fn not(self) -> Bitmask<'a, T> {
        self.invert()
    }
}
