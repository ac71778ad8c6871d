//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate provides the domain types shared by the generator, the
//! record store, the shortener service and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod shortcode;

pub use error::{CoreError, StorageError};
pub use repository::{NewRecord, ReadRepository, Repository, UrlRecord};
pub use shortcode::ShortCode;
