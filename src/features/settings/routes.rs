use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::settings::handlers::{show_settings, update_settings};
use crate::features::settings::services::SettingsService;
use crate::shared::constants::SETTINGS_PATH;

/// Create routes for the settings feature
pub fn routes(settings_service: Arc<SettingsService>) -> Router {
    Router::new()
        .route(SETTINGS_PATH, get(show_settings).post(update_settings))
        .with_state(settings_service)
}
