// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits consumed by the services.
//!
//! All async traits use `#[async_trait]` so they can be held as trait objects.

pub mod adapter;
pub mod auth;
pub mod notifier;
pub mod repository;
pub mod storage;

pub use adapter::PluginAdapter;
pub use auth::AuthProvider;
pub use notifier::Notifier;
pub use repository::{ContactRepository, TestimonialRepository};
pub use storage::StorageAdapter;
