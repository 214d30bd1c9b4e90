use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{rejection::FormRejection, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::shared::constants::NOTICE_COOKIE;
use crate::shared::notice::Notice;

/// Custom urlencoded form extractor that provides consistent error responses
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppFormRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppFormRejection(rejection)),
        }
    }
}

pub struct AppFormRejection(FormRejection);

impl IntoResponse for AppFormRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            FormRejection::FailedToDeserializeForm(err) => format!("Invalid form data: {}", err),
            FormRejection::InvalidFormContentType(err) => {
                format!("Missing form content type: {}", err)
            }
            _ => "Failed to parse form body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// Notice handed over by the previous response, read from the notice cookie
#[derive(Debug, Default)]
pub struct PendingNotice(Option<Notice>);

impl PendingNotice {
    /// Whether the request carried a readable notice
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn into_inner(self) -> Option<Notice> {
        self.0
    }
}

impl<S> FromRequestParts<S> for PendingNotice
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let prefix = format!("{}=", NOTICE_COOKIE);

        let notice = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
            .find_map(Notice::from_cookie_value);

        Ok(Self(notice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn extract(cookie: Option<&str>) -> PendingNotice {
        let mut builder = HttpRequest::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();

        PendingNotice::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_reads_notice_among_other_cookies() {
        let pending = extract(Some("theme=dark; notice=error:Something%20broke; lang=en")).await;

        assert_eq!(
            pending.into_inner(),
            Some(Notice::error("Something broke"))
        );
    }

    #[tokio::test]
    async fn test_no_cookie_means_no_notice() {
        let pending = extract(None).await;
        assert!(!pending.is_present());
    }

    #[tokio::test]
    async fn test_cleared_cookie_is_ignored() {
        let pending = extract(Some("notice=")).await;
        assert!(!pending.is_present());
    }
}
