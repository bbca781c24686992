use std::fmt;

use crate::origin::OriginKind;

/// Errors that can occur while assembling an invocation context.
#[derive(Debug)]
pub enum Error {
    /// A context invariant was violated
    Violation(Violation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Violation(v) => write!(f, "Context violation: {}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::Violation(v)
    }
}

/// A context violation with details about what failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The kind of violation that occurred
    pub kind: ViolationKind,
    /// Human-readable message explaining the violation
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an `InvalidContext` violation for the given origin kind.
    pub(crate) fn invalid_context(origin: OriginKind, message: impl Into<String>) -> Self {
        Self::new(ViolationKind::InvalidContext { origin }, message)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Violation {}

/// The kind of context violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Actor or impersonated actor presence is inconsistent with the origin
    InvalidContext {
        /// The origin kind the context was being built for
        origin: OriginKind,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::InvalidContext { origin } => {
                write!(f, "Invalid context for '{}' origin", origin)
            }
        }
    }
}
