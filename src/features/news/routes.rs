use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::news::handlers;
use crate::features::news::services::NewsService;

/// Public news routes (no authentication required)
pub fn routes(service: Arc<NewsService>) -> Router {
    Router::new()
        .route("/api/news", get(handlers::list_news))
        .with_state(service)
}

/// Mutating news routes; the API-key guard is layered on in `main`
pub fn protected_routes(service: Arc<NewsService>) -> Router {
    Router::new()
        .route("/api/news/{id}", patch(handlers::edit_news))
        .with_state(service)
}
