use thiserror::Error;

/// Errors emitted by the union selector.
///
/// Both variants are usage errors: they signal a malformed generated
/// artifact or a caller opting out of fallback behavior, never a
/// transient condition, so nothing here is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// An empty union member list reached the selector.
    #[error("no union members provided")]
    EmptyUnion,
    /// Provided data matched no member and random fallback was
    /// disabled.
    #[error("no compatible union members found")]
    NoCompatibleMember,
}
