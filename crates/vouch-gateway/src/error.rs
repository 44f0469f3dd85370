// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from [`VouchError`] to HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use vouch_core::VouchError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A handler error rendered as `{ "error": ... }` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub VouchError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            VouchError::Validation { .. } => StatusCode::BAD_REQUEST,
            VouchError::NotFound { .. } => StatusCode::NOT_FOUND,
            VouchError::OutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            VouchError::FeatureLimitExceeded { .. } => StatusCode::CONFLICT,
            VouchError::Auth(_) => StatusCode::UNAUTHORIZED,
            VouchError::Repository { .. }
            | VouchError::Notifier { .. }
            | VouchError::Config(_)
            | VouchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VouchError> for ApiError {
    fn from(e: VouchError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(VouchError::validation("body", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
            "internal server error".to_string()
        } else {
            match &self.0 {
                VouchError::Auth(msg) => msg.clone(),
                other => other.to_string(),
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
