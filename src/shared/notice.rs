//! One-shot user-facing notices.
//!
//! A notice is produced by a handler as an explicit value. When the handler
//! redirects, the notice rides along in a short-lived cookie which the next
//! rendered page reads through [`PendingNotice`](crate::core::extractor::PendingNotice)
//! and then clears.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::warn;

use crate::shared::constants::NOTICE_COOKIE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Success => "success",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "error" => Some(Severity::Error),
            "success" => Some(Severity::Success),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    /// Encode as `<severity>:<url-encoded message>` for the notice cookie
    pub fn to_cookie_value(&self) -> String {
        format!(
            "{}:{}",
            self.severity.as_str(),
            urlencoding::encode(&self.message)
        )
    }

    /// Decode a notice cookie value, ignoring anything malformed
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let (severity, message) = value.split_once(':')?;
        let severity = Severity::parse(severity)?;
        let message = urlencoding::decode(message).ok()?.into_owned();

        Some(Self { message, severity })
    }
}

/// `Set-Cookie` value that stores a notice for the next request
pub fn notice_cookie(notice: &Notice) -> Option<HeaderValue> {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        NOTICE_COOKIE,
        notice.to_cookie_value()
    );

    HeaderValue::from_str(&cookie)
        .map_err(|e| warn!("Dropping notice that cannot be sent as a cookie: {}", e))
        .ok()
}

/// `Set-Cookie` value that expires a previously stored notice
pub fn clear_notice_cookie() -> HeaderValue {
    HeaderValue::from_static("notice=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Redirect that hands a notice to the page it points at
#[derive(Debug)]
pub struct NoticeRedirect {
    to: &'static str,
    notice: Notice,
}

impl NoticeRedirect {
    pub fn new(to: &'static str, notice: Notice) -> Self {
        Self { to, notice }
    }
}

impl IntoResponse for NoticeRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(self.to).into_response();
        if let Some(cookie) = notice_cookie(&self.notice) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        response
    }
}
