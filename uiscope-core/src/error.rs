//! Error types for uiscope.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`UiError`] - Top-level error type for all uiscope operations
//! - [`WireError`] - Errors decoding or encoding wire actions
//!
//! Every variant of [`UiError`] other than [`UiError::Wire`] is a programmer
//! error that must surface at the call site. None of them are retried.

use crate::path::Path;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all uiscope operations.
#[derive(Error, Debug)]
pub enum UiError {
    /// A component updated a variable that neither it nor any ancestor
    /// declared. Raised before anything is dispatched.
    #[error(
        "the '{name}' UI variable is not defined in the UI context in \"{component}\" or any \
         parent UI context; declare it in the component's default state before using it"
    )]
    Undeclared {
        /// The offending variable.
        name: String,
        /// Display name of the component that tried to update it.
        component: String,
    },

    /// A mass update carried a variable with no entry in its routing table.
    #[error(
        "couldn't find variable '{name}' within your component's UI state context; \
         define '{name}' before using it"
    )]
    UnroutedTransform {
        /// The offending variable.
        name: String,
    },

    /// A custom reducer returned no state.
    #[error("your custom UI reducer at path '{path}' must return some state")]
    ReducerContract {
        /// Path the reducer is registered at.
        path: Path,
    },

    /// A wire action could not be decoded or encoded.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// A custom error, typically raised by a root reducer.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur converting actions to and from their wire form.
#[derive(Error, Debug)]
pub enum WireError {
    /// The payload was neither an object nor absent.
    #[error("action payload must be an object")]
    PayloadNotObject,

    /// A required payload field was missing.
    #[error("missing payload field: {0}")]
    MissingField(&'static str),

    /// A payload field had the wrong shape.
    #[error("invalid payload field `{field}`: {reason}")]
    InvalidField {
        /// The field name.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// serde failed to convert a typed action.
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl WireError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

// Convenience conversions
impl From<BoxError> for UiError {
    fn from(err: BoxError) -> Self {
        UiError::Custom(err)
    }
}
