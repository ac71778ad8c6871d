use thiserror::Error;

/// Errors returned while producing a short code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("secure random source failed: {0}")]
    Entropy(String),
    #[error("generated code too short: needed {needed} characters, got {available}")]
    TooShort { needed: usize, available: usize },
}
