use axum::http::StatusCode;
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::PendingNotice;
use crate::shared::templates::{render_page, Page};

/// Landing page
pub async fn home(pending: PendingNotice) -> Result<Page> {
    render_page("home.html", context! {}, pending, None)
}

/// Simple health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
