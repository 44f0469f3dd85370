// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vouch site backend.
//!
//! Holds the domain types, the error taxonomy, and the capability traits
//! (repository, auth provider, notifier) that every other crate builds on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::VouchError;
pub use types::{AdapterType, HealthStatus, FEATURED_LIMIT};

pub use traits::{
    AuthProvider, ContactRepository, Notifier, PluginAdapter, StorageAdapter,
    TestimonialRepository,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vouch_error_messages_name_the_problem() {
        let err = VouchError::OutOfRange {
            position: 9,
            max: 4,
        };
        assert_eq!(err.to_string(), "position 9 out of range (valid: 1..=4)");

        let err = VouchError::not_found("testimonial", "abc");
        assert_eq!(err.to_string(), "testimonial not found: abc");

        let err = VouchError::FeatureLimitExceeded {
            limit: FEATURED_LIMIT,
        };
        assert!(err.to_string().contains('5'));

        let err = VouchError::Repository {
            source: Box::new(std::io::Error::other("disk gone")),
        };
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn adapter_type_display_round_trips() {
        use std::str::FromStr;

        for variant in [AdapterType::Storage, AdapterType::Auth, AdapterType::Notifier] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_capability_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_storage_adapter<T: StorageAdapter>() {}
        fn _assert_testimonial_repo<T: TestimonialRepository>() {}
        fn _assert_contact_repo<T: ContactRepository>() {}
        fn _assert_auth_provider<T: AuthProvider>() {}
        fn _assert_notifier<T: Notifier>() {}
    }
}
