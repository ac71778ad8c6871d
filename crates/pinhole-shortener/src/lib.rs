//! URL shortener service implementation.
//!
//! This crate sits between the transport layer and the record store: it
//! draws candidate codes from a generator, retrying on collisions, and
//! decides what an expired record means when a code is resolved.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::ShortenerError;
pub use service::{ShortenerService, MAX_ATTEMPTS};
pub use shortener::{ExpirationPolicy, Resolution, ShortenParams, Shortened, Shortener};
