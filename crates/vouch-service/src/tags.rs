// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tag catalog and tag list hygiene.
//!
//! The catalog is display configuration. Nothing in the testimonial
//! invariants depends on it.

use serde::Serialize;
use vouch_config::model::TestimonialsConfig;

/// The configured grouping of known tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCatalog {
    pub engagement_types: Vec<String>,
    pub other_tags: Vec<String>,
}

/// A record's tags split into the two display groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedTags {
    pub engagement: Vec<String>,
    pub other: Vec<String>,
}

impl TagCatalog {
    pub fn new(engagement_types: Vec<String>, other_tags: Vec<String>) -> Self {
        Self {
            engagement_types: normalize_tags(engagement_types),
            other_tags: normalize_tags(other_tags),
        }
    }

    pub fn from_config(config: &TestimonialsConfig) -> Self {
        Self::new(
            config.engagement_types.clone(),
            config.other_tags.clone(),
        )
    }

    pub fn is_engagement_type(&self, tag: &str) -> bool {
        self.engagement_types.iter().any(|t| t == tag)
    }

    /// Split `tags` into engagement types and everything else, keeping order.
    pub fn classify(&self, tags: &[String]) -> ClassifiedTags {
        let (engagement, other) = tags
            .iter()
            .cloned()
            .partition(|tag| self.is_engagement_type(tag));
        ClassifiedTags { engagement, other }
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::from_config(&TestimonialsConfig::default())
    }
}

/// Trim every tag, drop empties, and drop repeats after the first occurrence.
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
