use thiserror::Error;

/// Errors raised while validating entity trees.
#[derive(Debug, Error)]
pub enum EntityError {
    /// The tree violates a structural invariant of the entity model.
    #[error("invalid entity tree: {0}")]
    Invalid(String),
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, EntityError>;
