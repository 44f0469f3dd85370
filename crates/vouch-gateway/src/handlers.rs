// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unauthenticated handlers: health, public listings, contact, and login.
//!
//! Listing endpoints never fail because of the store. A repository error is
//! logged and the visitor gets an empty result.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::warn;
use vouch_core::types::{Credentials, NewContactSubmission, Testimonial, TestimonialType};
use vouch_core::{HealthStatus, VouchError};
use vouch_service::{Page, PublicQuery};

use crate::error::ApiError;
use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub adapters: Vec<AdapterHealth>,
}

#[derive(Debug, Serialize)]
pub struct AdapterHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Query string for GET /v1/testimonials.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub testimonial_type: Option<String>,
    /// Comma-separated tag list; any tag may match.
    pub tags: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

impl ListParams {
    fn into_query(self) -> Result<PublicQuery, VouchError> {
        let testimonial_type = match self.testimonial_type.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse::<TestimonialType>().map_err(|_| {
                VouchError::validation("type", format!("unknown testimonial type `{raw}`"))
            })?),
        };
        let tags = self
            .tags
            .map(|raw| vouch_service::normalize_tags(raw.split(',').map(str::to_string)))
            .unwrap_or_default();
        Ok(PublicQuery {
            testimonial_type,
            tags,
            offset: self.offset.unwrap_or(0),
            limit: self.limit,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let mut adapters = Vec::with_capacity(state.health.adapters.len());
    let mut healthy = true;
    for adapter in &state.health.adapters {
        let (status, detail) = match adapter.health_check().await {
            Ok(HealthStatus::Healthy) => ("healthy", None),
            Ok(HealthStatus::Degraded(reason)) => ("degraded", Some(reason)),
            Ok(HealthStatus::Unhealthy(reason)) => {
                healthy = false;
                ("unhealthy", Some(reason))
            }
            Err(e) => {
                healthy = false;
                ("unhealthy", Some(e.to_string()))
            }
        };
        adapters.push(AdapterHealth {
            name: adapter.name().to_string(),
            status: status.to_string(),
            detail,
        });
    }

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        adapters,
    })
}

/// GET /v1/testimonials
pub async fn list_testimonials(
    State(state): State<GatewayState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page>, ApiError> {
    let query = params.into_query()?;
    let page = match state.public.page(&query).await {
        Ok(page) => page,
        Err(e) => {
            warn!(error = %e, "testimonial listing degraded to empty page");
            Page::empty(query.offset, state.public.effective_limit(query.limit))
        }
    };
    Ok(Json(page))
}

/// GET /v1/testimonials/featured
pub async fn list_featured(State(state): State<GatewayState>) -> Json<Vec<Testimonial>> {
    Json(state.public.list_featured().await.unwrap_or_else(|e| {
        warn!(error = %e, "featured listing degraded to empty");
        Vec::new()
    }))
}

/// GET /v1/testimonials/engagement-types
pub async fn list_engagement_types(State(state): State<GatewayState>) -> Json<Vec<String>> {
    Json(
        state
            .public
            .available_engagement_types(&state.catalog)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "engagement type facets degraded to empty");
                Vec::new()
            }),
    )
}

/// POST /v1/contact
pub async fn post_contact(
    State(state): State<GatewayState>,
    payload: Result<Json<NewContactSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(form) = payload.map_err(|_| {
        ApiError(VouchError::validation("body", "Missing required fields"))
    })?;
    let saved = state.contacts.submit(form).await?;
    Ok((
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: "Form submitted successfully".to_string(),
            id: saved.id,
        }),
    ))
}

/// POST /v1/auth/login
pub async fn post_login(
    State(state): State<GatewayState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = payload?;
    let session = state
        .auth
        .sign_in(Credentials {
            email: body.email,
            password: SecretString::from(body.password),
        })
        .await?;
    Ok(Json(LoginResponse {
        token: session.token,
        email: session.email,
        expires_at: session.expires_at,
    }))
}
