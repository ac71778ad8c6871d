use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_url_handler, get_url_handler, health_handler, redirect_handler};
use crate::state::AppState;

/// First path segments taken by fixed routes. They can never be used as
/// aliases since `/{code}` would be shadowed.
pub const RESERVED_CODES: &[&str] = &["health", "api"];

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/shorten", post(create_url_handler))
                    .route("/urls/{code}", get(get_url_handler)),
            )
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
