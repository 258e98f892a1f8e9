//! Dynamically shaped input.
//!
//! The typed API settles the shape of every argument at compile time. JSON
//! values do not, so this is where wrong shapes are rejected at runtime.

use std::fmt;

use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bitmask::Bitmask;
use crate::error::{Error, Result};
use crate::operand::{BitmaskInput, Operand, Operation};
use crate::set::BitmaskSet;

fn elements_from_json<T: DeserializeOwned>(values: &[Value]) -> Result<Vec<T>> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| {
            T::deserialize(value).map_err(|e| {
                Error::InvalidArgument(format!("element {value} at position {position}: {e}"))
            })
        })
        .collect()
}

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<T: PartialEq + DeserializeOwned> BitmaskSet<T> {
    /// Build a set from a JSON array of elements.
    ///
    /// Anything but an array is [`Error::InvalidArgument`]; an empty array is
    /// [`Error::EmptyUniverse`].
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Array(values) = value else {
            return Err(Error::InvalidArgument(format!(
                "the set defined by all elements must be an array, got {}",
                shape(value)
            )));
        };

        Self::new(elements_from_json(values)?)
    }
}

impl<T: PartialEq + Clone + fmt::Debug + DeserializeOwned> BitmaskSet<T> {
    /// Build a bitmask from a JSON array (elements), string (digits) or
    /// unsigned integer (bit value).
    pub fn bitmask_from_json(&self, value: &Value) -> Result<Bitmask<'_, T>> {
        let input = match value {
            Value::Array(values) => BitmaskInput::Elements(elements_from_json(values)?),
            Value::String(digits) => BitmaskInput::Digits(digits.clone()),
            Value::Number(n) => match n.as_u64() {
                Some(bits) => BitmaskInput::Bits(BigUint::from(bits)),
                None => {
                    return Err(Error::InvalidArgument(format!(
                        "bit value must be an unsigned integer, got {n}"
                    )));
                }
            },
            other => {
                return Err(Error::InvalidArgument(format!(
                    "a bitmask is built from elements, bits or a bit string, got {}",
                    shape(other)
                )));
            }
        };

        self.bitmask(input)
    }
}

impl<'a, T: PartialEq + Clone + fmt::Debug + DeserializeOwned> Bitmask<'a, T> {
    /// Apply a polymorphic operation to a JSON operand.
    ///
    /// An array is a list of elements; a string is a serialized bitmask of
    /// the same set. Anything else is [`Error::UnsupportedArgument`].
    pub fn apply_json(&self, operation: Operation, value: &Value) -> Result<Self> {
        let other;
        let operand = match value {
            Value::Array(values) => Operand::Elements(elements_from_json(values)?),
            Value::String(digits) => {
                other = self.set().bitmask(digits.as_str())?;
                Operand::Bitmask(&other)
            }
            _ => return Err(Error::UnsupportedArgument { operation }),
        };

        match operation {
            Operation::Add => self.add(operand),
            Operation::Remove => self.remove(operand),
            Operation::Distinct => self.distinct(operand),
            Operation::Intersection => self.intersection(operand),
        }
    }
}
