use mocksmith_runtime::RuntimeError;
use thiserror::Error;

/// Failures while lowering an entity tree into a generator module.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("unsupported literal value: {0}")]
    UnsupportedLiteral(String),
    #[error("entity kind {0} cannot appear in value position")]
    UnexpectedNode(String),
    #[error("array length override needs an enclosing declaration ({0})")]
    MissingDeclarationContext(String),
    #[error("duplicate generator function name: {0}")]
    DuplicateFunction(String),
}

/// Failures while running a generated module.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("no generator function named {0}")]
    UnknownFunction(String),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
