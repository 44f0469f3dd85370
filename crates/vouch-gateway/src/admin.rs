// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin console handlers. Every route here sits behind [`require_session`].
//!
//! [`require_session`]: crate::auth::require_session

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use vouch_core::types::{
    AuthSession, ContactStatus, ContactSubmission, Direction, NewTestimonial, Testimonial,
    TestimonialPatch,
};
use vouch_service::TagCatalog;

use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct CreateTestimonialRequest {
    #[serde(flatten)]
    pub input: NewTestimonial,
    /// Desired 1-based rank. Omitted or non-positive appends at the end.
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTestimonialRequest {
    #[serde(flatten)]
    pub patch: TestimonialPatch,
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: Direction,
}

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub position: i64,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedRequest {
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ActiveRequest {
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ContactStatusRequest {
    pub status: ContactStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactListParams {
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub writes: usize,
}

/// POST /v1/auth/logout
pub async fn post_logout(
    State(state): State<GatewayState>,
    Extension(session): Extension<AuthSession>,
) -> Result<StatusCode, ApiError> {
    state.auth.sign_out(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/admin/session
pub async fn get_session(Extension(session): Extension<AuthSession>) -> Json<AuthSession> {
    Json(session)
}

/// GET /v1/admin/testimonials, every record in display order.
pub async fn list_testimonials(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.testimonials.list_all().await?))
}

/// POST /v1/admin/testimonials
pub async fn create_testimonial(
    State(state): State<GatewayState>,
    payload: Result<Json<CreateTestimonialRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let created = state.testimonials.create(body.input, body.position).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /v1/admin/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTestimonialRequest>, JsonRejection>,
) -> Result<Json<Testimonial>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(
        state
            .testimonials
            .update(&id, body.patch, body.position)
            .await?,
    ))
}

/// DELETE /v1/admin/testimonials/{id}, returns the renumbered list.
pub async fn delete_testimonial(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.testimonials.delete(&id).await?))
}

/// POST /v1/admin/testimonials/{id}/move
pub async fn move_neighbor(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(
        state.testimonials.move_neighbor(&id, body.direction).await?,
    ))
}

/// POST /v1/admin/testimonials/{id}/position
pub async fn move_to_position(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<PositionRequest>, JsonRejection>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(state.testimonials.move_to(&id, body.position).await?))
}

/// POST /v1/admin/testimonials/normalize
pub async fn normalize_positions(
    State(state): State<GatewayState>,
) -> Result<Json<NormalizeResponse>, ApiError> {
    let writes = state.testimonials.normalize().await?;
    Ok(Json(NormalizeResponse { writes }))
}

/// PUT /v1/admin/testimonials/{id}/featured
pub async fn set_featured(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<FeaturedRequest>, JsonRejection>,
) -> Result<Json<Testimonial>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(state.testimonials.set_featured(&id, body.featured).await?))
}

/// PUT /v1/admin/testimonials/{id}/active
pub async fn set_active(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<ActiveRequest>, JsonRejection>,
) -> Result<Json<Testimonial>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(state.testimonials.set_active(&id, body.active).await?))
}

/// GET /v1/admin/contacts?status=new
pub async fn list_contacts(
    State(state): State<GatewayState>,
    Query(params): Query<ContactListParams>,
) -> Result<Json<Vec<ContactSubmission>>, ApiError> {
    Ok(Json(state.contacts.list(params.status).await?))
}

/// PUT /v1/admin/contacts/{id}/status
pub async fn set_contact_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<ContactStatusRequest>, JsonRejection>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let Json(body) = payload?;
    Ok(Json(state.contacts.set_status(&id, body.status).await?))
}

/// GET /v1/admin/tags
pub async fn get_tag_catalog(State(state): State<GatewayState>) -> Json<TagCatalog> {
    Json(state.catalog.as_ref().clone())
}
