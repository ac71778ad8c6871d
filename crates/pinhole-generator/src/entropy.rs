use crate::error::GenerationError;

/// A source of cryptographically secure random bytes.
pub trait EntropySource: Send + Sync + 'static {
    /// Fills `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), GenerationError>;
}

/// The operating system's secure random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> Result<(), GenerationError> {
        getrandom::fill(buf).map_err(|e| GenerationError::Entropy(e.to_string()))
    }
}
