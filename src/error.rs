//! Error type for strict registry lookups

use thiserror::Error;

/// Error raised by the strict lookup operations.
///
/// Lenient lookups (`get_field`, `remove_field`) report a miss as `None`
/// instead; missing optional field capabilities are silent no-ops and never
/// produce an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No field with the given name is registered.
    #[error("field name \"{name}\" not found")]
    FieldNotFound { name: String },
}

impl FormError {
    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        FormError::FieldNotFound { name: name.into() }
    }
}
