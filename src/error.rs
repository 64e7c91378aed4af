//! Error handling for the radix-collections library
//!
//! Every fallible operation in the crate reports a [`CollectionError`]. Errors
//! are deterministic: an operation either completes or fails without leaving
//! partial state behind, so nothing here is retried.

use thiserror::Error;

/// Main error type for the collection library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Mutation attempted through a view that rejects it
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// The rejected operation
        operation: String,
    },

    /// Index outside of the valid range
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Operation invoked in a state that does not allow it
    #[error("Illegal state: {message}")]
    IllegalState {
        /// Description of the state violation
        message: String,
    },

    /// Element requested past the end of a sequence or from an empty one
    #[error("No such element: {message}")]
    NoSuchElement {
        /// Description of the missing element
        message: String,
    },

    /// Invalid argument supplied at construction time
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl CollectionError {
    /// Create an unsupported operation error
    pub fn unsupported<S: Into<String>>(operation: S) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an illegal state error
    pub fn illegal_state<S: Into<String>>(message: S) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Create a no such element error
    pub fn no_such_element<S: Into<String>>(message: S) -> Self {
        Self::NoSuchElement {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Programmer errors (bad indices, cursor misuse, bad arguments) are not
    /// recoverable; a rejected mutation leaves the collection usable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnsupportedOperation { .. } => true,
            Self::NoSuchElement { .. } => true,
            Self::OutOfBounds { .. } => false,
            Self::IllegalState { .. } => false,
            Self::InvalidArgument { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "unsupported",
            Self::OutOfBounds { .. } => "bounds",
            Self::IllegalState { .. } => "state",
            Self::NoSuchElement { .. } => "element",
            Self::InvalidArgument { .. } => "argument",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(CollectionError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

/// Assert that a range is within bounds
#[inline]
pub fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end {
        return Err(CollectionError::invalid_argument(format!(
            "Invalid range: start {} > end {}",
            start, end
        )));
    }
    if end > size {
        return Err(CollectionError::invalid_argument(format!(
            "Invalid range: end {} > size {}",
            end, size
        )));
    }
    Ok(())
}
