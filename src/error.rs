//! Contains the `Error` and `Result` types that `valkey_batch_core` uses.

use std::time::Duration;

use thiserror::Error;

use crate::convert::ResponseKind;

/// The result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while assembling or executing a batch.
///
/// The inner [`ErrorKind`] is wrapped in a `Box` to keep `Error` small on the stack -- most
/// call sites only match on a handful of variants and propagate the rest with `?`.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
#[non_exhaustive]
pub struct Error {
    /// The specific kind of error that occurred.
    pub kind: Box<ErrorKind>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Returns a reference to the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Argument {
            message: message.into(),
        })
    }

    pub(crate) fn binary_conversion() -> Self {
        Self::new(ErrorKind::BinaryConversion)
    }

    pub(crate) fn wire_grammar(command: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WireGrammar {
            command,
            message: message.into(),
        })
    }

    pub(crate) fn response_shape(expected: ResponseKind, got: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseShape {
            expected,
            got: got.into(),
        })
    }

    pub(crate) fn server(message: impl Into<String>, code: Option<String>) -> Self {
        Self::new(ErrorKind::Server {
            message: message.into(),
            code,
        })
    }

    pub(crate) fn connection(message: impl Into<String>, retryable: bool) -> Self {
        Self::new(ErrorKind::Connection {
            message: message.into(),
            retryable,
        })
    }

    pub(crate) fn timeout(after: Duration) -> Self {
        Self::new(ErrorKind::Timeout(after))
    }

    pub(crate) fn cancelled() -> Self {
        Self::new(ErrorKind::Cancellation)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Whether this error represents a server error classified as retryable (a subset of
    /// transient errors like `TRYAGAIN` or `MOVED` during slot migration).
    pub fn is_retryable_server_error(&self) -> bool {
        matches!(&*self.kind, ErrorKind::Server { .. })
    }

    /// Whether this error represents a connection-level failure classified as retryable.
    pub fn is_retryable_connection_error(&self) -> bool {
        matches!(&*self.kind, ErrorKind::Connection { retryable: true, .. })
    }
}

/// The taxonomy of errors this crate can surface, matching the behavioral classes documented
/// for the batch builder and its dispatcher.
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The caller violated a builder method's precondition (e.g. an empty keys array where one
    /// or more keys are required).
    #[error("argument error: {message}")]
    Argument { message: String },

    /// A value that is not text-convertible was asked to render as text.
    #[error("value is not text-convertible and cannot be read as text")]
    BinaryConversion,

    /// The builder assembled a command that cannot possibly match the server's wire grammar.
    /// This indicates a defect in the builder itself, not caller misuse.
    #[error("internal wire grammar error assembling `{command}`: {message}")]
    WireGrammar {
        command: &'static str,
        message: String,
    },

    /// The transport returned a value whose shape does not match the converter registered for
    /// the command at that response slot.
    #[error("response shape error: expected {expected:?}, got {got}")]
    ResponseShape { expected: ResponseKind, got: String },

    /// The server replied with a command-level error.
    #[error("server error: {message}")]
    Server {
        message: String,
        code: Option<String>,
    },

    /// The transport failed to deliver the batch (a network or connection-level failure).
    #[error("connection error: {message}")]
    Connection { message: String, retryable: bool },

    /// The batch's overall deadline elapsed before a complete response was received.
    #[error("batch timed out after {0:?}")]
    Timeout(Duration),

    /// Execution of the batch was cancelled before it completed.
    #[error("batch execution was cancelled")]
    Cancellation,

    /// A fatal internal invariant was violated (e.g. the transport returned a response vector
    /// whose length does not match the number of submitted commands).
    #[error("internal invariant violated: {0}")]
    Internal(String),
}
