//! HTML view rendering.
//!
//! Handlers render through [`render_page`], which merges pending and freshly
//! raised notices into the template context and clears the notice cookie once
//! it has been shown.

pub mod engine;

pub use engine::{render_template, TemplateError};

use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Value};

use crate::core::error::Result;
use crate::core::extractor::PendingNotice;
use crate::shared::notice::{clear_notice_cookie, Notice};

/// A rendered HTML page
#[derive(Debug)]
pub struct Page {
    html: String,
    clear_notice: bool,
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let mut response = Html(self.html).into_response();
        if self.clear_notice {
            response
                .headers_mut()
                .append(header::SET_COOKIE, clear_notice_cookie());
        }
        response
    }
}

/// Render a view with the pending notice and an optional notice raised while
/// handling this request.
///
/// # Arguments
/// * `template_name` - The template name (e.g., "members.html")
/// * `ctx` - View-specific context
/// * `pending` - Notice carried over from a redirect, if any
/// * `raised` - Notice produced by the current request
pub fn render_page(
    template_name: &str,
    ctx: Value,
    pending: PendingNotice,
    raised: Option<Notice>,
) -> Result<Page> {
    let clear_notice = pending.is_present();
    let notices: Vec<Notice> = pending.into_inner().into_iter().chain(raised).collect();

    let html = render_template(template_name, context! { notices => notices, ..ctx })?;

    Ok(Page { html, clear_notice })
}
