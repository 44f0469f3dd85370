// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session middleware for admin routes.
//!
//! Expects `Authorization: Bearer <session token>`. A missing, unknown, or
//! expired token is rejected with 401 before the handler runs. On success the
//! resolved [`AuthSession`] is stored in the request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use vouch_core::types::AuthSession;
use vouch_core::{AuthProvider, VouchError};

use crate::error::ApiError;

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn require_session(
    State(auth): State<Arc<dyn AuthProvider>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request).map(str::to_string) else {
        return ApiError(VouchError::Auth("missing bearer token".to_string())).into_response();
    };

    let session: Option<AuthSession> = match auth.get_session(&token).await {
        Ok(session) => session,
        Err(e) => return ApiError(e).into_response(),
    };
    let Some(session) = session else {
        tracing::debug!("rejected admin request with unknown or expired token");
        return ApiError(VouchError::Auth("invalid or expired session".to_string()))
            .into_response();
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&request(Some("Bearer abc123"))), Some("abc123"));
    }

    #[test]
    fn rejects_other_schemes_and_blank_tokens() {
        assert_eq!(bearer_token(&request(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request(Some("Bearer   "))), None);
        assert_eq!(bearer_token(&request(None)), None);
    }
}
