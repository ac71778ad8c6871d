use crate::error::Result;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A stored URL record in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the record was inserted. Never changes afterwards.
    pub created_at: Timestamp,
    /// When the record expires, if ever.
    pub expire_at: Option<Timestamp>,
    /// How many times the code has been followed.
    pub clicks: u64,
}

impl UrlRecord {
    /// Returns `true` if the record has an expiry strictly before `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expire_at.is_some_and(|expire_at| expire_at < now)
    }

    /// Returns `true` if the record has already expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }
}

/// The caller-supplied part of a record, handed to [`Repository::create`].
///
/// `created_at` and `clicks` are owned by the repository and are not part
/// of the request.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct NewRecord {
    #[builder(setter(into))]
    pub original_url: String,
    #[builder(default)]
    pub expire_at: Option<Timestamp>,
    /// Replace an existing record under the same code instead of failing.
    #[builder(default)]
    pub overwrite: bool,
}

/// A read-only view of a repository.
///
/// Reads never interpret expiry; deciding what an expired record means is
/// left to the caller.
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves a snapshot of the URL record for a given short code.
    /// Returns `None` if the code does not exist.
    fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Checks whether a short code already exists in the repository.
    fn exists(&self, code: &ShortCode) -> Result<bool>;
}

pub trait Repository: ReadRepository {
    /// Inserts a new URL record.
    ///
    /// Returns `Err(Conflict)` if the code already exists and
    /// `record.overwrite` is `false`. With `overwrite` set, any existing
    /// record is replaced and its click count starts again from zero.
    fn create(&self, code: &ShortCode, record: NewRecord) -> Result<()>;

    /// Adds one click to the record for `code`.
    ///
    /// Missing codes are ignored.
    fn increment_click(&self, code: &ShortCode) -> Result<()>;
}
