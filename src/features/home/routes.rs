use axum::{routing::get, Router};

use crate::features::home::handlers::{health_check, home};
use crate::shared::constants::HOME_PATH;

/// Create routes for the landing page and health check
pub fn routes() -> Router {
    Router::new()
        .route(HOME_PATH, get(home))
        .route("/health", get(health_check))
}
