use crate::entropy::{EntropySource, OsEntropy};
use crate::error::GenerationError;
use crate::Generator;
use base64::Engine as _;
use pinhole_core::ShortCode;

/// Number of characters in every generated code.
pub const CODE_LENGTH: usize = 6;

/// Random bytes drawn per code.
///
/// 12 bytes encode to 16 base64 characters. Each character is `-` or `_`
/// with probability 1/32, so losing more than 10 of the 16 to filtering is
/// negligible.
const RAW_BYTES: usize = 12;

/// Generates random alphanumeric codes of [`CODE_LENGTH`] characters.
///
/// Random bytes are encoded with the URL-safe base64 alphabet, the two
/// non-alphanumeric symbols (`-` and `_`) are dropped, and the first
/// [`CODE_LENGTH`] characters of what remains form the code.
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator<E = OsEntropy> {
    entropy: E,
}

impl RandomGenerator<OsEntropy> {
    /// Creates a generator backed by the operating system RNG.
    pub fn new() -> Self {
        Self { entropy: OsEntropy }
    }
}

impl<E: EntropySource> RandomGenerator<E> {
    /// Creates a generator that draws its bytes from `entropy`.
    pub fn with_entropy(entropy: E) -> Self {
        Self { entropy }
    }

    pub fn next_code(&self) -> Result<ShortCode, GenerationError> {
        let mut raw = [0u8; RAW_BYTES];
        self.entropy.fill(&mut raw)?;

        let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);
        let code: String = encoded
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(CODE_LENGTH)
            .collect();

        if code.len() < CODE_LENGTH {
            return Err(GenerationError::TooShort {
                needed: CODE_LENGTH,
                available: code.len(),
            });
        }

        Ok(ShortCode::new_unchecked(code))
    }
}

impl<E: EntropySource> Generator for RandomGenerator<E> {
    fn generate(&self) -> Result<ShortCode, GenerationError> {
        self.next_code()
    }
}
