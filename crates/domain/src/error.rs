//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`InventoryError`] via `From`.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// A caller-supplied value was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The identifier could not be parsed.
    #[error("invalid id {0:?}")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_not_found_with_entity_and_id() {
        let err = InventoryError::from(NotFoundError {
            entity: "Product",
            id: "42".to_string(),
        });
        assert_eq!(err.to_string(), "Product 42 not found");
    }

    #[test]
    fn should_format_invalid_id() {
        let err = InventoryError::from(ValidationError::InvalidId("abc".to_string()));
        assert_eq!(err.to_string(), "validation error: invalid id \"abc\"");
    }
}
