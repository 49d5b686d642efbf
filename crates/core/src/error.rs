//! Domain-level error taxonomy shared by all crates.

/// Domain error produced by repositories and handlers.
///
/// The API layer maps each variant onto an HTTP status and a stable
/// machine-readable code; this crate stays transport-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came up empty.
    #[error("{entity} not found")]
    NotFound {
        /// Human-readable entity name, e.g. `"Advocate"`.
        entity: &'static str,
    },

    /// Input failed domain validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with current state (duplicate registration,
    /// call already in progress, rating already submitted, bad transition).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Authentication failed or is missing.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A wallet does not carry enough balance for the requested operation.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// The caller must wait before repeating this operation.
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// An invariant the system relies on was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common not-found case.
    pub fn not_found(entity: &'static str) -> Self {
        CoreError::NotFound { entity }
    }
}
