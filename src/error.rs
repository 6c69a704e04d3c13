use std::{error::Error as StdError, fmt::Display};

/// A result with the crates [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error while inserting into or modifying a sequence.
///
/// All operations that return this error fail before any
/// element was moved, so the sequence remains untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value could not be compared with the element at `index`.
    TypeMismatch {
        /// The index of the element that was incomparable.
        index: usize,
    },
    /// A positional operation targeted an index outside the list.
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },
}

impl Error {
    /// Whether this error was caused by incomparable elements.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { index } => {
                write!(f, "value is not comparable with the element at index {index}")
            }
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for a list of length {len}")
            }
        }
    }
}

impl StdError for Error {}
