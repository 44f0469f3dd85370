// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across capability traits and services.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Maximum number of testimonials that may be featured at once.
pub const FEATURED_LIMIT: usize = 5;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a capability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Auth,
    Notifier,
}

// --- Testimonials ---

/// Source of a testimonial.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TestimonialType {
    #[default]
    Client,
    CharacterWitness,
}

/// A stored testimonial.
///
/// `position` defines the total order over every testimonial, active or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub quote: String,
    pub author: String,
    pub company: String,
    pub position: i64,
    pub is_active: bool,
    pub featured: bool,
    pub tags: Vec<String>,
    pub testimonial_type: TestimonialType,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields supplied when creating a testimonial. Position is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub quote: String,
    pub author: String,
    pub company: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub testimonial_type: TestimonialType,
}

fn default_true() -> bool {
    true
}

/// Partial update of the non-position fields of a testimonial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialPatch {
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub testimonial_type: Option<TestimonialType>,
}

impl TestimonialPatch {
    /// Apply this patch to a record in place.
    pub fn apply_to(&self, t: &mut Testimonial) {
        if let Some(quote) = &self.quote {
            t.quote = quote.clone();
        }
        if let Some(author) = &self.author {
            t.author = author.clone();
        }
        if let Some(company) = &self.company {
            t.company = company.clone();
        }
        if let Some(active) = self.is_active {
            t.is_active = active;
        }
        if let Some(featured) = self.featured {
            t.featured = featured;
        }
        if let Some(tags) = &self.tags {
            t.tags = tags.clone();
        }
        if let Some(kind) = self.testimonial_type {
            t.testimonial_type = kind;
        }
    }
}

/// Row filter for repository listings. `None` imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestimonialFilter {
    pub active: Option<bool>,
    pub featured: Option<bool>,
}

impl TestimonialFilter {
    /// Every testimonial, active or not.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only `is_active = true`.
    pub fn active() -> Self {
        Self {
            active: Some(true),
            featured: None,
        }
    }

    /// Active and featured.
    pub fn featured() -> Self {
        Self {
            active: Some(true),
            featured: Some(true),
        }
    }

    pub fn matches(&self, t: &Testimonial) -> bool {
        self.active.is_none_or(|a| t.is_active == a)
            && self.featured.is_none_or(|f| t.featured == f)
    }
}

/// A single position write produced by the ordering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub id: String,
    pub position: i64,
}

/// Direction of a neighbor swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

// --- Contact submissions ---

/// Triage state of a contact submission.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Responded,
    Archived,
}

/// A public inquiry received through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub inquiry_type: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Contact form payload as submitted by a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization: Option<String>,
    pub inquiry_type: String,
    pub message: String,
}

// --- Auth ---

/// Sign-in credentials for an admin editor.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session lifecycle notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { email: String },
    SignedOut { email: String },
    Expired { email: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Testimonial {
        Testimonial {
            id: "t1".into(),
            quote: "Great".into(),
            author: "Ada".into(),
            company: "Acme".into(),
            position: 1,
            is_active: true,
            featured: false,
            tags: vec!["Keynote Speaking".into()],
            testimonial_type: TestimonialType::Client,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn testimonial_type_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&TestimonialType::CharacterWitness).unwrap();
        assert_eq!(json, "\"character_witness\"");
        assert_eq!(
            TestimonialType::from_str("character_witness").unwrap(),
            TestimonialType::CharacterWitness
        );
        assert_eq!(TestimonialType::Client.to_string(), "client");
    }

    #[test]
    fn new_testimonial_defaults_to_active_client() {
        let input: NewTestimonial =
            serde_json::from_str(r#"{"quote":"q","author":"a","company":"c"}"#).unwrap();
        assert!(input.is_active);
        assert!(!input.featured);
        assert!(input.tags.is_empty());
        assert_eq!(input.testimonial_type, TestimonialType::Client);
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut t = sample();
        let patch = TestimonialPatch {
            author: Some("Grace".into()),
            featured: Some(true),
            ..Default::default()
        };
        patch.apply_to(&mut t);
        assert_eq!(t.author, "Grace");
        assert!(t.featured);
        assert_eq!(t.quote, "Great");
        assert_eq!(t.position, 1);
    }

    #[test]
    fn filter_matches_flags() {
        let mut t = sample();
        assert!(TestimonialFilter::all().matches(&t));
        assert!(TestimonialFilter::active().matches(&t));
        assert!(!TestimonialFilter::featured().matches(&t));
        t.is_active = false;
        t.featured = true;
        assert!(!TestimonialFilter::featured().matches(&t));
        assert!(TestimonialFilter::all().matches(&t));
    }

    #[test]
    fn contact_payload_uses_camel_case() {
        let json = r#"{
            "name": "Ada",
            "email": "ada@example.com",
            "inquiryType": "Keynote Speaking",
            "message": "Hello"
        }"#;
        let form: NewContactSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(form.inquiry_type, "Keynote Speaking");
        assert!(form.organization.is_none());
    }

    #[test]
    fn contact_status_round_trips_through_strings() {
        for status in [
            ContactStatus::New,
            ContactStatus::Read,
            ContactStatus::Responded,
            ContactStatus::Archived,
        ] {
            let s = status.to_string();
            assert_eq!(ContactStatus::from_str(&s).unwrap(), status);
        }
    }
}
