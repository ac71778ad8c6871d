//! HTTP front end for the Pinhole shortener.
//!
//! Handlers translate requests into [`Shortener`](pinhole_shortener::Shortener)
//! calls. Composing public short links from the configured base URL happens
//! here; the core never sees host names.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::{App, RESERVED_CODES};
pub use state::AppState;
