// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository capabilities for testimonials and contact submissions.
//!
//! The services treat every call as a fallible remote operation. Ordering
//! invariants are NOT enforced here; the store only persists what it is told.

use async_trait::async_trait;

use crate::error::VouchError;
use crate::types::{
    ContactStatus, ContactSubmission, NewContactSubmission, NewTestimonial, PositionChange,
    Testimonial, TestimonialFilter, TestimonialPatch,
};

/// Durable store of testimonial records.
#[async_trait]
pub trait TestimonialRepository: Send + Sync {
    /// Point read by id.
    async fn get_testimonial(&self, id: &str) -> Result<Option<Testimonial>, VouchError>;

    /// Lists matching rows ordered by `position`, then `created_at`, then `id`.
    async fn list_testimonials(
        &self,
        filter: TestimonialFilter,
    ) -> Result<Vec<Testimonial>, VouchError>;

    /// Inserts a record at `max(position) + 1`, computed in the same write.
    async fn append_testimonial(&self, input: &NewTestimonial) -> Result<Testimonial, VouchError>;

    /// Persists non-position fields. Returns `None` if the id does not exist.
    async fn update_testimonial(
        &self,
        id: &str,
        patch: &TestimonialPatch,
    ) -> Result<Option<Testimonial>, VouchError>;

    /// Removes a record. Returns `false` if the id did not exist.
    async fn delete_testimonial(&self, id: &str) -> Result<bool, VouchError>;

    /// Counts featured rows, optionally ignoring one id.
    async fn count_featured(&self, excluding: Option<&str>) -> Result<usize, VouchError>;

    /// Writes every change or none of them.
    ///
    /// Fails with `NotFound` (and applies nothing) if any id is missing.
    async fn apply_positions(&self, changes: &[PositionChange]) -> Result<(), VouchError>;
}

/// Durable store of contact form submissions.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Persists a submission with status `new`.
    async fn insert_contact(
        &self,
        form: &NewContactSubmission,
    ) -> Result<ContactSubmission, VouchError>;

    async fn get_contact(&self, id: &str) -> Result<Option<ContactSubmission>, VouchError>;

    /// Newest first, optionally filtered by status.
    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactSubmission>, VouchError>;

    /// Returns `None` if the id does not exist.
    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactSubmission>, VouchError>;
}
