use crate::error::ShortenerError;
use crate::shortener::{ExpirationPolicy, Resolution, ShortenParams, Shortened, Shortener};
use jiff::Timestamp;
use pinhole_core::{NewRecord, Repository, ShortCode, StorageError, UrlRecord};
use pinhole_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Upper bound on generate-and-create attempts for a single shorten call.
pub const MAX_ATTEMPTS: usize = 5;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - short code generation with bounded collision retry
/// - custom aliases
/// - expiration policy conversion and lazy expiry on resolve
/// - best-effort click counting
///
/// Each create attempt is its own atomic repository call, so no lock is
/// held across the retry loop.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_shared_repository(Arc::new(repository), generator)
    }

    /// Creates a service over a repository that other components also hold.
    pub fn with_shared_repository(repository: Arc<R>, generator: G) -> Self {
        Self {
            repository,
            generator: Arc::new(generator),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Only emptiness is checked; the URL is otherwise opaque.
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.trim().is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn expire_at(policy: &ExpirationPolicy) -> Result<Option<Timestamp>, ShortenerError> {
        match policy {
            ExpirationPolicy::Never => Ok(None),
            ExpirationPolicy::AfterDuration(duration) => Timestamp::now()
                .checked_add(*duration)
                .map(Some)
                .map_err(|e| ShortenerError::InvalidExpiration(e.to_string())),
            ExpirationPolicy::AtTimestamp(timestamp) => Ok(Some(*timestamp)),
        }
    }

    fn create_with_alias(
        &self,
        code: ShortCode,
        record: NewRecord,
    ) -> Result<ShortCode, ShortenerError> {
        match self.repository.create(&code, record) {
            Ok(()) => {
                debug!(code = %code, "created aliased short code");
                Ok(code)
            }
            Err(StorageError::Conflict(code)) => Err(ShortenerError::AliasConflict(code)),
            Err(e) => Err(ShortenerError::Storage(e)),
        }
    }

    fn create_with_generated_code(
        &self,
        original_url: String,
        expire_at: Option<Timestamp>,
    ) -> Result<ShortCode, ShortenerError> {
        for attempt in 1..=MAX_ATTEMPTS {
            // generator failures are not collisions; give up straight away
            let code = self.generator.generate()?;
            let record = NewRecord::builder()
                .original_url(original_url.clone())
                .expire_at(expire_at)
                .build();

            match self.repository.create(&code, record) {
                Ok(()) => {
                    debug!(code = %code, attempt, "created short code");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, attempt, "short code collision, retrying");
                }
                Err(e) => return Err(ShortenerError::Storage(e)),
            }
        }

        warn!(attempts = MAX_ATTEMPTS, "no free short code found");
        Err(ShortenerError::ExhaustedRetries {
            attempts: MAX_ATTEMPTS,
        })
    }
}

impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    fn shorten(&self, params: ShortenParams) -> Result<Shortened, ShortenerError> {
        Self::validate_url(&params.original_url)?;
        let expire_at = Self::expire_at(&params.expiration)?;

        let code = match params.custom_alias {
            Some(alias) => {
                let code = ShortCode::new(alias)?;
                let record = NewRecord::builder()
                    .original_url(params.original_url)
                    .expire_at(expire_at)
                    .overwrite(params.overwrite)
                    .build();
                self.create_with_alias(code, record)?
            }
            None => self.create_with_generated_code(params.original_url, expire_at)?,
        };

        Ok(Shortened { code, expire_at })
    }

    fn resolve(&self, code: &ShortCode) -> Result<Resolution, ShortenerError> {
        trace!(code = %code, "resolving short code");

        let Some(record) = self
            .repository
            .get(code)
            .map_err(ShortenerError::Storage)?
        else {
            trace!(code = %code, "short code not found");
            return Ok(Resolution::NotFound);
        };

        if record.is_expired() {
            debug!(code = %code, "record has expired");
            return Ok(Resolution::Expired(record));
        }

        // Click tracking is advisory and must never fail a redirect.
        if let Err(e) = self.repository.increment_click(code) {
            warn!(code = %code, error = %e, "failed to record click");
        }

        debug!(code = %code, url = %record.original_url, "resolved short code");
        Ok(Resolution::Found(record))
    }

    fn stats(&self, code: &ShortCode) -> Result<Option<UrlRecord>, ShortenerError> {
        self.repository.get(code).map_err(ShortenerError::Storage)
    }
}
