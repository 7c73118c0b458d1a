//! Registry construction errors.

use thiserror::Error;
use toolbox_model::Mode;

/// A tool definition that cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tool definition has an empty id")]
    EmptyId,

    #[error("duplicate tool id '{0}'")]
    DuplicateId(String),

    /// A required presentation field is empty.
    #[error("tool '{id}' has an empty {field}")]
    MissingField { id: String, field: &'static str },

    /// A field that must be set for every mode the tool exposes.
    #[error("tool '{id}' has an empty {field} for {mode} mode")]
    MissingModeField {
        id: String,
        field: &'static str,
        mode: Mode,
    },
}
