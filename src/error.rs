use thiserror::Error;

/// Recoverable failures while completing a declared type.
///
/// Broken invariants inside an already built type graph are not reported
/// here; they panic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeclError {
    #[error("{shape} type cannot be completed as a declared type")]
    NotNamed { shape: &'static str },
    #[error("underlying type of {name} already set")]
    UnderlyingAlreadySet { name: String },
    #[error("invalid recursive type {name}")]
    InvalidRecursiveType { name: String },
    #[error("method {name} already declared")]
    DuplicateMethod { name: String },
}
