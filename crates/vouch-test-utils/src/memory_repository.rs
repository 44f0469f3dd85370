// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory repository for deterministic service tests.
//!
//! `MemoryRepository` implements both repository traits over plain vectors.
//! It counts position writes so tests can assert write minimality, and can be
//! switched into a failing mode to exercise error paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use vouch_core::types::{
    ContactStatus, ContactSubmission, NewContactSubmission, NewTestimonial, PositionChange,
    Testimonial, TestimonialFilter, TestimonialPatch,
};
use vouch_core::{ContactRepository, TestimonialRepository, VouchError};

#[derive(Default)]
struct State {
    testimonials: Vec<Testimonial>,
    contacts: Vec<ContactSubmission>,
    seq: u64,
}

impl State {
    /// Monotonic fixed-width timestamp so creation order is also sort order.
    fn next_timestamp(&mut self) -> String {
        self.seq += 1;
        format!("2026-01-01T00:00:00.{:06}Z", self.seq)
    }
}

/// A repository that keeps everything in memory.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    state: Arc<Mutex<State>>,
    position_writes: Arc<AtomicUsize>,
    apply_calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record verbatim, keeping its id and position.
    ///
    /// Used to set up gapped or duplicated orderings.
    pub async fn seed(&self, id: &str, position: i64) -> Testimonial {
        let mut state = self.state.lock().await;
        let ts = state.next_timestamp();
        let record = Testimonial {
            id: id.to_string(),
            quote: format!("Quote from {id}"),
            author: format!("Author {id}"),
            company: "Acme".to_string(),
            position,
            is_active: true,
            featured: false,
            tags: Vec::new(),
            testimonial_type: Default::default(),
            created_at: ts.clone(),
            updated_at: ts,
        };
        state.testimonials.push(record.clone());
        record
    }

    /// Replace a stored record wholesale.
    pub async fn put(&self, record: Testimonial) {
        let mut state = self.state.lock().await;
        match state.testimonials.iter_mut().find(|t| t.id == record.id) {
            Some(slot) => *slot = record,
            None => state.testimonials.push(record),
        }
    }

    /// Current `(id, position)` pairs in display order.
    pub async fn positions(&self) -> Vec<(String, i64)> {
        let mut rows = self.state.lock().await.testimonials.clone();
        sort_for_display(&mut rows);
        rows.into_iter().map(|t| (t.id, t.position)).collect()
    }

    /// Total number of individual position writes applied so far.
    pub fn position_writes(&self) -> usize {
        self.position_writes.load(Ordering::SeqCst)
    }

    /// Number of `apply_positions` calls, including empty batches.
    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    pub fn reset_counters(&self) {
        self.position_writes.store(0, Ordering::SeqCst);
        self.apply_calls.store(0, Ordering::SeqCst);
    }

    /// Make every subsequent call fail with a repository error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), VouchError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VouchError::Repository {
                source: "injected repository failure".into(),
            });
        }
        Ok(())
    }
}

fn sort_for_display(rows: &mut [Testimonial]) {
    rows.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[async_trait]
impl TestimonialRepository for MemoryRepository {
    async fn get_testimonial(&self, id: &str) -> Result<Option<Testimonial>, VouchError> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state.testimonials.iter().find(|t| t.id == id).cloned())
    }

    async fn list_testimonials(
        &self,
        filter: TestimonialFilter,
    ) -> Result<Vec<Testimonial>, VouchError> {
        self.check()?;
        let state = self.state.lock().await;
        let mut rows: Vec<Testimonial> = state
            .testimonials
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        sort_for_display(&mut rows);
        Ok(rows)
    }

    async fn append_testimonial(&self, input: &NewTestimonial) -> Result<Testimonial, VouchError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let next = state
            .testimonials
            .iter()
            .map(|t| t.position)
            .max()
            .unwrap_or(0)
            + 1;
        let ts = state.next_timestamp();
        let record = Testimonial {
            id: uuid::Uuid::new_v4().to_string(),
            quote: input.quote.clone(),
            author: input.author.clone(),
            company: input.company.clone(),
            position: next,
            is_active: input.is_active,
            featured: input.featured,
            tags: input.tags.clone(),
            testimonial_type: input.testimonial_type,
            created_at: ts.clone(),
            updated_at: ts,
        };
        state.testimonials.push(record.clone());
        Ok(record)
    }

    async fn update_testimonial(
        &self,
        id: &str,
        patch: &TestimonialPatch,
    ) -> Result<Option<Testimonial>, VouchError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let ts = state.next_timestamp();
        let Some(record) = state.testimonials.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        patch.apply_to(record);
        record.updated_at = ts;
        Ok(Some(record.clone()))
    }

    async fn delete_testimonial(&self, id: &str) -> Result<bool, VouchError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let before = state.testimonials.len();
        state.testimonials.retain(|t| t.id != id);
        Ok(state.testimonials.len() != before)
    }

    async fn count_featured(&self, excluding: Option<&str>) -> Result<usize, VouchError> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state
            .testimonials
            .iter()
            .filter(|t| t.featured && Some(t.id.as_str()) != excluding)
            .count())
    }

    async fn apply_positions(&self, changes: &[PositionChange]) -> Result<(), VouchError> {
        self.check()?;
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        if let Some(missing) = changes
            .iter()
            .find(|c| !state.testimonials.iter().any(|t| t.id == c.id))
        {
            return Err(VouchError::not_found("testimonial", missing.id.clone()));
        }
        for change in changes {
            if let Some(t) = state.testimonials.iter_mut().find(|t| t.id == change.id) {
                t.position = change.position;
            }
        }
        self.position_writes
            .fetch_add(changes.len(), Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for MemoryRepository {
    async fn insert_contact(
        &self,
        form: &NewContactSubmission,
    ) -> Result<ContactSubmission, VouchError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let ts = state.next_timestamp();
        let record = ContactSubmission {
            id: uuid::Uuid::new_v4().to_string(),
            name: form.name.clone(),
            email: form.email.clone(),
            organization: form.organization.clone(),
            inquiry_type: form.inquiry_type.clone(),
            message: form.message.clone(),
            status: ContactStatus::New,
            created_at: ts.clone(),
            updated_at: ts,
        };
        state.contacts.push(record.clone());
        Ok(record)
    }

    async fn get_contact(&self, id: &str) -> Result<Option<ContactSubmission>, VouchError> {
        self.check()?;
        let state = self.state.lock().await;
        Ok(state.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn list_contacts(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactSubmission>, VouchError> {
        self.check()?;
        let state = self.state.lock().await;
        let mut rows: Vec<ContactSubmission> = state
            .contacts
            .iter()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn update_contact_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactSubmission>, VouchError> {
        self.check()?;
        let mut state = self.state.lock().await;
        let ts = state.next_timestamp();
        let Some(record) = state.contacts.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        record.status = status;
        record.updated_at = ts;
        Ok(Some(record.clone()))
    }
}
