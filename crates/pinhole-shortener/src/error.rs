use pinhole_core::{CoreError, StorageError};
use pinhole_generator::GenerationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid expiration: {0}")]
    InvalidExpiration(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("could not find a free short code after {attempts} attempts")]
    ExhaustedRetries { attempts: usize },
    #[error("code generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("storage error: {0}")]
    Storage(StorageError),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
