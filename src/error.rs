use std::fmt;

use crate::status::StatusLike;

/// Errors that can occur while building envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required input object was absent.
    MissingInput {
        /// Which input was missing (e.g. `"status"`, `"error"`)
        what: &'static str,
    },
    /// A message template had more placeholders than substitutions.
    ArityMismatch {
        /// Number of placeholder markers in the template
        placeholders: usize,
        /// Number of substitutions supplied
        supplied: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingInput { what } => write!(f, "Missing input: {} is required", what),
            Error::ArityMismatch {
                placeholders,
                supplied,
            } => write!(
                f,
                "Arity mismatch: {} placeholder(s) but {} substitution(s)",
                placeholders, supplied
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Read-only view of a caught application error.
///
/// Anything that carries a numeric status, a symbolic code and a message can
/// be turned into a failed [`Envelope`](crate::Envelope).
pub trait ErrorLike {
    /// Numeric status code.
    fn status(&self) -> i32;
    /// Symbolic error code.
    fn code(&self) -> &str;
    /// Human-readable message.
    fn msg(&self) -> &str;
}

impl<E: ErrorLike + ?Sized> ErrorLike for &E {
    fn status(&self) -> i32 {
        (**self).status()
    }

    fn code(&self) -> &str {
        (**self).code()
    }

    fn msg(&self) -> &str {
        (**self).msg()
    }
}

/// An application error raised by service code.
///
/// Carries the same status/code/message triple an envelope exposes, so a
/// handler can bubble it up with `?` and convert it at the response boundary.
///
/// # Examples
///
/// ```
/// use ext_common::{Envelope, ServiceError};
///
/// let err = ServiceError::new(-3, "E_INTERFACE", "interface exception");
/// let envelope: Envelope<()> = Envelope::from_error(&err);
///
/// assert!(!envelope.success);
/// assert_eq!(envelope.status, -3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    status: i32,
    code: String,
    msg: String,
}

impl ServiceError {
    /// Creates a new service error.
    pub fn new(status: i32, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            msg: msg.into(),
        }
    }

    /// Creates a service error from a status-like value.
    ///
    /// The success flag of `status` is ignored.
    pub fn from_status(status: &impl StatusLike) -> Self {
        Self::new(status.status(), status.code(), status.msg())
    }
}

impl ErrorLike for ServiceError {
    fn status(&self) -> i32 {
        self.status
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "[{}] {}", self.status, self.msg)
        } else {
            write!(f, "[{} {}] {}", self.status, self.code, self.msg)
        }
    }
}

impl std::error::Error for ServiceError {}
