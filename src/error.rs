//! Error types for malformed environment values.
//!
//! A missing variable is never an error. The only failure is a value that
//! is present but cannot be converted to the requested type; the accessor
//! still hands back the caller's default alongside the [`ParseError`].

use std::num::{ParseFloatError, ParseIntError};

use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::duration::DurationError;

/// The target type an environment value was parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    String,
    Bool,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Duration,
    #[strum(serialize = "std duration")]
    StdDuration,
}

/// Why a raw value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
    Bool,

    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error("unsigned integer cannot carry a sign")]
    UnexpectedSign,

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value out of range")]
    FloatOutOfRange,

    #[error("NaN cannot carry a sign")]
    SignedNan,

    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// A variable was set but its value could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} value {value:?} in {key}: {reason}")]
pub struct ParseError {
    /// Name of the variable that was looked up (after prefix composition).
    pub key: String,
    /// The raw value found in the environment.
    pub value: String,
    pub kind: ValueKind,
    #[source]
    pub reason: ParseFailure,
}

impl ParseError {
    pub(crate) fn new(key: &str, value: String, kind: ValueKind, reason: ParseFailure) -> Self {
        Self {
            key: key.to_string(),
            value,
            kind,
            reason,
        }
    }
}
