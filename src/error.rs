// src/error.rs
//! Error taxonomy for the material subsystem.
//!
//! Validation failures are non-fatal by policy: a rejected `set` leaves the
//! component untouched and returns the failure so callers and tests can
//! assert on the outcome instead of scraping log output.

use thiserror::Error;

use crate::uniform::UniformKind;

/// Errors produced by material components and aggregates.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MaterialError {
    /// A candidate value has the wrong kind for the target slot.
    #[error("uniform `{name}`: expected {expected}, got {got}")]
    TypeMismatch {
        name: String,
        expected: UniformKind,
        got: UniformKind,
    },

    /// A candidate value has the right kind but a NaN or infinite lane.
    #[error("uniform `{name}`: rejected non-finite {kind} value")]
    NonFinite { name: String, kind: UniformKind },

    /// No uniform with this name exists in the material.
    #[error("uniform `{name}` not found in material")]
    UniformNotFound { name: String },

    /// A material definition file could not be parsed.
    #[error("material definition parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenient `Result` alias for material operations.
pub type Result<T> = std::result::Result<T, MaterialError>;
