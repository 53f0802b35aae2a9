//! Application error types and their HTTP representations.
//!
//! `AppError` is the shared error taxonomy for handlers. `AppErrorResponse`
//! pairs an error with the request ID so the failure log line can be
//! correlated with the request span; the `ResultExt` helper attaches the ID
//! at the `?` site.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::io;

use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Content service error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Guide not found: {0}")]
    GuideNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::GuideNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Upstream(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Content service unavailable".to_string(),
            ),
            _ => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
    <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
    <div class="container">
        <div class="error-page">
            <h1>Error {}</h1>
            <p>{}</p>
            <a href="/">Return to homepage</a>
        </div>
    </div>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, Html(body)).into_response()
    }
}

/// An `AppError` annotated with the request ID it occurred under.
#[derive(Debug)]
pub struct AppErrorResponse {
    error: AppError,
    request_id: Option<RequestId>,
}

impl From<AppError> for AppErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error,
            request_id: None,
        }
    }
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        match &self.request_id {
            Some(id) => tracing::warn!(request_id = %id.0, error = %self.error, "Request failed"),
            None => tracing::warn!(error = %self.error, "Request failed"),
        }
        self.error.into_response()
    }
}

/// Attaches the current request ID to an error result.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|e| AppErrorResponse {
            error: e.into(),
            request_id: Some(request_id.clone()),
        })
    }
}
