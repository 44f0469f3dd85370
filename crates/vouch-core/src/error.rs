// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vouch site backend.

use thiserror::Error;

/// The primary error type used across all capability traits and services.
#[derive(Debug, Error)]
pub enum VouchError {
    /// A required field is missing or malformed.
    #[error("validation error on `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A position argument fell outside `[1, max]`.
    #[error("position {position} out of range (valid: 1..={max})")]
    OutOfRange { position: i64, max: i64 },

    /// Enabling another featured testimonial would exceed the cap.
    #[error("featured limit of {limit} testimonials reached")]
    FeatureLimitExceeded { limit: usize },

    /// Opaque failure from the durable store.
    #[error("repository error: {source}")]
    Repository {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Identity provider rejected the request or the session is invalid.
    #[error("auth error: {0}")]
    Auth(String),

    /// Outbound notification failed.
    #[error("notifier error: {message}")]
    Notifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid values, unparsable hashes).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VouchError {
    /// Shorthand for a [`VouchError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`VouchError::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}
