use std::fmt;

use thiserror::Error;

use crate::operand::Operation;

/// Which side of the expected width a digit string fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Shorter,
    Longer,
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Shorter => f.write_str("string is shorter"),
            Length::Longer => f.write_str("string is longer"),
        }
    }
}

/// Errors raised while building sets and bitmasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Construction input missing or of the wrong shape
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A set needs at least one element
    #[error("the set defined by all elements cannot be empty")]
    EmptyUniverse,

    /// An element has no index in the owning set
    #[error("element {element} (input position {position}) not found in set")]
    ElementNotFound { position: usize, element: String },

    /// The integer needs more bits than the set has elements
    #[error("value needs {bits} bits but the set only has {size} elements")]
    TooManyBits { bits: u64, size: usize },

    #[error("the string to build the bitmask from is empty")]
    EmptyInput,

    /// Digit string length differs from the set size
    #[error(
        "the string to build the bitmask from does not match the set's size \
         ({length}: {actual} vs {expected})",
        length = Length::of(.actual, .expected)
    )]
    LengthMismatch { expected: usize, actual: usize },

    /// Digit string contains something other than '0' or '1'
    #[error("invalid character {character:?} at position {position}: only '0' and '1' are allowed")]
    InvalidCharacter { character: char, position: usize },

    /// A polymorphic operation received neither elements nor a bitmask
    #[error("unsupported argument for {operation}")]
    UnsupportedArgument { operation: Operation },
}

impl Length {
    fn of(actual: &usize, expected: &usize) -> Self {
        if actual < expected {
            Length::Shorter
        } else {
            Length::Longer
        }
    }
}

impl Error {
    /// For [`Error::LengthMismatch`], whether the input was too short or too long.
    pub fn length(&self) -> Option<Length> {
        match self {
            Error::LengthMismatch { expected, actual } => Some(Length::of(actual, expected)),
            _ => None,
        }
    }
}

/// A specialized Result type for bitmask operations
pub type Result<T> = std::result::Result<T, Error>;
