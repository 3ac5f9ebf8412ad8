//! Error types for engine operations.
//!
//! Player-facing negative outcomes (unmet requirements, insufficient
//! resources, unknown ids at selection time) are ordinary return values, not
//! errors - see `SelectionFailure`. `EngineError` is reserved for authoring
//! integrity faults and misuse of the engine API.

use storyloom_domain::DomainError;

/// Engine operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Loaded content references something that does not exist. A defect in
    /// authored content, not a runtime condition.
    #[error("Authoring fault in {context}: {message}")]
    Authoring {
        context: &'static str,
        message: String,
    },

    /// Engine API misuse (e.g., completing a situation that is not active).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Domain invariant violation bubbled up from the domain layer.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create an Authoring error with context.
    pub fn authoring(context: &'static str, message: impl ToString) -> Self {
        Self::Authoring {
            context,
            message: message.to_string(),
        }
    }

    /// Create a Constraint error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::Constraint(message.to_string())
    }

    /// Check if this is an Authoring error.
    pub fn is_authoring(&self) -> bool {
        matches!(self, Self::Authoring { .. })
    }
}
