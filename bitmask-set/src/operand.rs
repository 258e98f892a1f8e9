use std::fmt;

use num_bigint::BigUint;

use crate::bitmask::Bitmask;

/// The three ways to describe a bitmask's contents.
///
/// Dispatch is on the variant, so each constructor path validates only the
/// shape it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitmaskInput<T> {
    /// Member elements, in any order; duplicates are harmless.
    Elements(Vec<T>),
    /// The bit value; must fit in the set's width.
    Bits(BigUint),
    /// Exactly `size` characters of `'0'`/`'1'`.
    Digits(String),
}

impl<T> From<Vec<T>> for BitmaskInput<T> {
    fn from(elements: Vec<T>) -> Self {
        BitmaskInput::Elements(elements)
    }
}

impl<T: Clone> From<&[T]> for BitmaskInput<T> {
    fn from(elements: &[T]) -> Self {
        BitmaskInput::Elements(elements.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for BitmaskInput<T> {
    fn from(elements: [T; N]) -> Self {
        BitmaskInput::Elements(elements.into())
    }
}

impl<T> From<BigUint> for BitmaskInput<T> {
    fn from(bits: BigUint) -> Self {
        BitmaskInput::Bits(bits)
    }
}

impl<T> From<&BigUint> for BitmaskInput<T> {
    fn from(bits: &BigUint) -> Self {
        BitmaskInput::Bits(bits.clone())
    }
}

impl<T> From<String> for BitmaskInput<T> {
    fn from(digits: String) -> Self {
        BitmaskInput::Digits(digits)
    }
}

impl<T> From<&str> for BitmaskInput<T> {
    fn from(digits: &str) -> Self {
        BitmaskInput::Digits(digits.to_owned())
    }
}

/// Argument of the polymorphic set operations: either elements to convert
/// through the owning set, or an existing bitmask.
#[derive(Debug)]
pub enum Operand<'o, 'a, T> {
    Elements(Vec<T>),
    Bitmask(&'o Bitmask<'a, T>),
}

impl<'o, 'a, T> From<&'o Bitmask<'a, T>> for Operand<'o, 'a, T> {
    fn from(bitmask: &'o Bitmask<'a, T>) -> Self {
        Operand::Bitmask(bitmask)
    }
}

impl<T> From<Vec<T>> for Operand<'_, '_, T> {
    fn from(elements: Vec<T>) -> Self {
        Operand::Elements(elements)
    }
}

impl<T: Clone> From<&[T]> for Operand<'_, '_, T> {
    fn from(elements: &[T]) -> Self {
        Operand::Elements(elements.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for Operand<'_, '_, T> {
    fn from(elements: [T; N]) -> Self {
        Operand::Elements(elements.into())
    }
}

/// The polymorphic operations, used to label argument errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Union (`add`, `include`, `union`).
    Add,
    /// Difference (`remove`, `exclude`).
    Remove,
    /// Symmetric difference (`distinct`, `unlike`, `different`).
    Distinct,
    /// Intersection (`intersection`, `intersect`).
    Intersection,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "Bitmask::add",
            Operation::Remove => "Bitmask::remove",
            Operation::Distinct => "Bitmask::distinct",
            Operation::Intersection => "Bitmask::intersection",
        };
        f.write_str(name)
    }
}
