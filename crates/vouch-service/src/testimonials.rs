// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin-facing testimonial operations.
//!
//! `TestimonialService` validates input, enforces the featured cap, and
//! delegates every reorder to the [`OrderingEngine`]. Each mutation answers
//! with state re-read from the repository.

use std::sync::Arc;

use tracing::{debug, info};
use vouch_core::types::{Direction, NewTestimonial, Testimonial, TestimonialPatch};
use vouch_core::{FEATURED_LIMIT, TestimonialRepository, VouchError};

use crate::ordering::OrderingEngine;
use crate::tags::normalize_tags;

#[derive(Clone)]
pub struct TestimonialService {
    repo: Arc<dyn TestimonialRepository>,
    engine: OrderingEngine,
}

impl TestimonialService {
    pub fn new(repo: Arc<dyn TestimonialRepository>) -> Self {
        let engine = OrderingEngine::new(repo.clone());
        Self { repo, engine }
    }

    pub fn engine(&self) -> &OrderingEngine {
        &self.engine
    }

    /// Every testimonial, active or not, in display order.
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, VouchError> {
        self.engine.snapshot().await
    }

    pub async fn get(&self, id: &str) -> Result<Testimonial, VouchError> {
        self.repo
            .get_testimonial(id)
            .await?
            .ok_or_else(|| VouchError::not_found("testimonial", id))
    }

    /// Append a new testimonial, then move it to `target` when one is given.
    pub async fn create(
        &self,
        input: NewTestimonial,
        target: Option<i64>,
    ) -> Result<Testimonial, VouchError> {
        let input = NewTestimonial {
            quote: required("quote", &input.quote)?,
            author: required("author", &input.author)?,
            company: required("company", &input.company)?,
            tags: normalize_tags(input.tags),
            ..input
        };
        if input.featured {
            self.ensure_feature_slot(None).await?;
        }

        let created = self.repo.append_testimonial(&input).await?;
        info!(id = %created.id, position = created.position, "testimonial created");

        if let Some(target) = target.filter(|t| *t > 0) {
            self.engine.insert_at_position(&created.id, target).await?;
        }
        self.get(&created.id).await
    }

    /// Patch content fields, then move the record when `target` is given.
    pub async fn update(
        &self,
        id: &str,
        patch: TestimonialPatch,
        target: Option<i64>,
    ) -> Result<Testimonial, VouchError> {
        let current = self.get(id).await?;
        let patch = TestimonialPatch {
            quote: patch.quote.map(|v| required("quote", &v)).transpose()?,
            author: patch.author.map(|v| required("author", &v)).transpose()?,
            company: patch.company.map(|v| required("company", &v)).transpose()?,
            tags: patch.tags.map(normalize_tags),
            ..patch
        };
        if patch.featured == Some(true) && !current.featured {
            self.ensure_feature_slot(Some(id)).await?;
        }
        let target = target.filter(|t| *t > 0);
        if let Some(target) = target {
            self.engine.validate_target(target).await?;
        }

        self.repo
            .update_testimonial(id, &patch)
            .await?
            .ok_or_else(|| VouchError::not_found("testimonial", id))?;

        if let Some(target) = target {
            self.engine.insert_at_position(id, target).await?;
        }
        debug!(id, "testimonial updated");
        self.get(id).await
    }

    /// Remove a testimonial and close the gap it leaves.
    pub async fn delete(&self, id: &str) -> Result<Vec<Testimonial>, VouchError> {
        if !self.repo.delete_testimonial(id).await? {
            return Err(VouchError::not_found("testimonial", id));
        }
        let writes = self.engine.normalize().await?;
        info!(id, writes, "testimonial deleted");
        self.list_all().await
    }

    /// Toggle the featured flag. Turning it on respects [`FEATURED_LIMIT`].
    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<Testimonial, VouchError> {
        let current = self.get(id).await?;
        if featured && !current.featured {
            self.ensure_feature_slot(Some(id)).await?;
        }
        self.patch(
            id,
            TestimonialPatch {
                featured: Some(featured),
                ..Default::default()
            },
        )
        .await
    }

    /// Show or hide a testimonial. Its position is kept either way.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<Testimonial, VouchError> {
        self.patch(
            id,
            TestimonialPatch {
                is_active: Some(active),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn move_to(&self, id: &str, target: i64) -> Result<Vec<Testimonial>, VouchError> {
        self.engine.insert_at_position(id, target).await?;
        self.list_all().await
    }

    pub async fn move_neighbor(
        &self,
        id: &str,
        direction: Direction,
    ) -> Result<Vec<Testimonial>, VouchError> {
        self.engine.swap_neighbors(id, direction).await?;
        self.list_all().await
    }

    /// Explicit repair action. Returns the number of rows renumbered.
    pub async fn normalize(&self) -> Result<usize, VouchError> {
        let writes = self.engine.normalize().await?;
        info!(writes, "positions normalized");
        Ok(writes)
    }

    async fn patch(&self, id: &str, patch: TestimonialPatch) -> Result<Testimonial, VouchError> {
        self.repo
            .update_testimonial(id, &patch)
            .await?
            .ok_or_else(|| VouchError::not_found("testimonial", id))
    }

    async fn ensure_feature_slot(&self, excluding: Option<&str>) -> Result<(), VouchError> {
        let featured = self.repo.count_featured(excluding).await?;
        if featured >= FEATURED_LIMIT {
            return Err(VouchError::FeatureLimitExceeded {
                limit: FEATURED_LIMIT,
            });
        }
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<String, VouchError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VouchError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
