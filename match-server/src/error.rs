//! Error categories shared by the matcher and the request lifecycle.
//!
//! Each operation has its own error enum carrying the details; callers that
//! only need to decide how to react (the web layer picking a status code)
//! use the [`ErrorKind`] those errors map to.

use std::fmt;

use serde::Serialize;

/// Coarse classification of operation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A journey, user or request does not exist.
    NotFound,

    /// Input exists but cannot be used (missing coordinates, malformed time).
    PreconditionFailed,

    /// Caller-supplied values are invalid (empty or too-long message).
    Validation,

    /// The acting user is not the party allowed to perform the operation.
    Forbidden,

    /// The request is not in a state that allows the transition.
    InvalidState,

    /// The operation would duplicate an existing request.
    Conflict,

    /// The store failed.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::PreconditionFailed => "precondition failed",
            ErrorKind::Validation => "validation error",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Storage => "storage error",
        };
        f.write_str(s)
    }
}
