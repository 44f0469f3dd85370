// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact form intake.
//!
//! A submission is stored first; the notification runs afterwards on its own
//! task and can never undo or delay the stored record.

use std::sync::Arc;

use tracing::{info, warn};
use vouch_core::types::{ContactStatus, ContactSubmission, NewContactSubmission};
use vouch_core::{ContactRepository, Notifier, VouchError};

#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { repo, notifier }
    }

    /// Validate, persist, and fire off the owner notification.
    pub async fn submit(&self, form: NewContactSubmission) -> Result<ContactSubmission, VouchError> {
        let form = validate(form)?;
        let saved = self.repo.insert_contact(&form).await?;
        info!(id = %saved.id, inquiry_type = %saved.inquiry_type, "contact submission stored");

        let notifier = self.notifier.clone();
        let submission = saved.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&submission).await {
                warn!(id = %submission.id, error = %e, "contact notification failed");
            }
        });

        Ok(saved)
    }

    /// Submissions newest first, optionally narrowed to one status.
    pub async fn list(
        &self,
        status: Option<ContactStatus>,
    ) -> Result<Vec<ContactSubmission>, VouchError> {
        self.repo.list_contacts(status).await
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<ContactSubmission, VouchError> {
        self.repo
            .update_contact_status(id, status)
            .await?
            .ok_or_else(|| VouchError::not_found("contact submission", id))
    }
}

fn validate(form: NewContactSubmission) -> Result<NewContactSubmission, VouchError> {
    let field = |name: &str, value: &str| -> Result<String, VouchError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(VouchError::validation(name, "is required"));
        }
        Ok(value.to_string())
    };

    let email = field("email", &form.email)?;
    if !email.contains('@') {
        return Err(VouchError::validation("email", "is not a valid email address"));
    }

    Ok(NewContactSubmission {
        name: field("name", &form.name)?,
        email,
        organization: form
            .organization
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty()),
        inquiry_type: field("inquiryType", &form.inquiry_type)?,
        message: field("message", &form.message)?,
    })
}
