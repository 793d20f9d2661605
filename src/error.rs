//! Greeter Errors
//!
//! Everything that can stop the create -> set-name -> say-hi sequence.

use std::ffi::NulError;

use thiserror::Error;

use crate::context::ffi::Status;
use crate::ffi::FfiError;

/// Errors raised while driving a [`Hellow`](crate::greeter::Hellow) boundary.
#[derive(Debug, Error)]
pub enum GreeterError {
    /// No name was given on the command line
    #[error("insufficient arguments: expected the name to greet as the first argument")]
    MissingName,

    /// The string contains a NUL byte and cannot cross the C boundary
    #[error("cannot pass {what} across the C boundary: {source}")]
    InvalidString {
        what: &'static str,
        #[source]
        source: NulError,
    },

    /// The context factory returned a null handle
    #[error("library returned a null context")]
    NullContext,

    /// A boundary call reported a non-zero status
    #[error("{operation} failed: {status}")]
    Status {
        operation: &'static str,
        status: Status,
    },

    /// The boundary does not provide this operation
    #[error("operation not supported by this library: {0}")]
    Unsupported(&'static str),

    /// Loading or resolving the native library failed
    #[error(transparent)]
    Ffi(#[from] FfiError),
}

impl GreeterError {
    /// Wrap a `NulError` for the named argument.
    pub fn invalid_string(what: &'static str, source: NulError) -> Self {
        GreeterError::InvalidString { what, source }
    }
}

/// Result type for greeter operations.
pub type GreeterResult<T> = Result<T, GreeterError>;
