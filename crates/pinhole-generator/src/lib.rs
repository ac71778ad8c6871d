//! Short code generators.
//!
//! Generators are pure: they never look at storage. Uniqueness is
//! enforced by the record store, and collisions are retried by the caller.

pub mod entropy;
pub mod error;
pub mod random;

pub use entropy::{EntropySource, OsEntropy};
pub use error::GenerationError;
pub use random::{RandomGenerator, CODE_LENGTH};

use pinhole_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A generated code is only a candidate; it may collide with one that
/// already exists.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate short code.
    ///
    /// Failures are reported as-is and never retried internally.
    fn generate(&self) -> Result<ShortCode, GenerationError>;
}
