// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vouch_core::{AuthProvider, PluginAdapter, VouchError};
use vouch_service::{ContactService, PublicReadSurface, TagCatalog, TestimonialService};

use crate::auth::require_session;
use crate::{admin, handlers};

/// State for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Adapters whose health is reported by `GET /health`.
    pub adapters: Vec<Arc<dyn PluginAdapter>>,
}

impl HealthState {
    pub fn new(adapters: Vec<Arc<dyn PluginAdapter>>) -> Self {
        Self {
            start_time: std::time::Instant::now(),
            adapters,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub testimonials: TestimonialService,
    pub public: PublicReadSurface,
    pub contacts: ContactService,
    pub auth: Arc<dyn AuthProvider>,
    pub catalog: Arc<TagCatalog>,
    pub health: HealthState,
}

/// Address the server binds to.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Assemble every route with its middleware.
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/v1/testimonials", get(handlers::list_testimonials))
        .route("/v1/testimonials/featured", get(handlers::list_featured))
        .route(
            "/v1/testimonials/engagement-types",
            get(handlers::list_engagement_types),
        )
        .route("/v1/contact", post(handlers::post_contact))
        .route("/v1/auth/login", post(handlers::post_login))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/v1/auth/logout", post(admin::post_logout))
        .route("/v1/admin/session", get(admin::get_session))
        .route(
            "/v1/admin/testimonials",
            get(admin::list_testimonials).post(admin::create_testimonial),
        )
        .route(
            "/v1/admin/testimonials/normalize",
            post(admin::normalize_positions),
        )
        .route(
            "/v1/admin/testimonials/{id}",
            put(admin::update_testimonial).delete(admin::delete_testimonial),
        )
        .route("/v1/admin/testimonials/{id}/move", post(admin::move_neighbor))
        .route(
            "/v1/admin/testimonials/{id}/position",
            post(admin::move_to_position),
        )
        .route(
            "/v1/admin/testimonials/{id}/featured",
            put(admin::set_featured),
        )
        .route("/v1/admin/testimonials/{id}/active", put(admin::set_active))
        .route("/v1/admin/contacts", get(admin::list_contacts))
        .route(
            "/v1/admin/contacts/{id}/status",
            put(admin::set_contact_status),
        )
        .route("/v1/admin/tags", get(admin::get_tag_catalog))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            require_session,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until `cancel` fires.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), VouchError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VouchError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| VouchError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }

    #[test]
    fn health_state_starts_now() {
        let health = HealthState::new(Vec::new());
        assert!(health.start_time.elapsed().as_secs() < 5);
        assert!(health.adapters.is_empty());
    }
}
