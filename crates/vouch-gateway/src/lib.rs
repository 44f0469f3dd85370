// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Vouch site backend.
//!
//! Public routes serve the testimonial listings and accept contact
//! submissions. Routes under `/v1/admin` require a session token issued by
//! `POST /v1/auth/login`.

pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{GatewayState, HealthState, ServerConfig, build_router, start_server};
