use crate::error::ShortenerError;
use jiff::{SignedDuration, Timestamp};
use pinhole_core::{ShortCode, UrlRecord};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Expiration policy for a shortened URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ExpirationPolicy {
    /// The shortened URL never expires.
    #[default]
    Never,
    /// The shortened URL expires after a certain duration from now.
    AfterDuration(SignedDuration),
    /// The shortened URL expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    #[builder(setter(into))]
    pub original_url: String,
    /// The expiration policy for the shortened URL.
    #[builder(default)]
    pub expiration: ExpirationPolicy,
    /// Optional custom alias for the shortened URL, validated by the
    /// service before use.
    #[builder(default, setter(into))]
    pub custom_alias: Option<String>,
    /// Replace an existing record under `custom_alias`. Ignored for
    /// generated codes, which never overwrite.
    #[builder(default)]
    pub overwrite: bool,
}

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortened {
    pub code: ShortCode,
    /// The expiry written with the record.
    pub expire_at: Option<Timestamp>,
}

/// Outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The code is live. The record is the view from before this visit
    /// was counted.
    Found(UrlRecord),
    /// The code exists but its expiry has passed.
    Expired(UrlRecord),
    NotFound,
}

pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns its short code together with
    /// the expiry that was stored.
    fn shorten(&self, params: ShortenParams) -> Result<Shortened>;

    /// Resolves a short code for a visit, counting a click when the
    /// record is live.
    fn resolve(&self, code: &ShortCode) -> Result<Resolution>;

    /// Returns the stored record as-is, expired or not, without counting
    /// a click.
    fn stats(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;
}
