// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resend HTTP API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;

use vouch_config::model::NotifierConfig;
use vouch_core::types::ContactSubmission;
use vouch_core::{Notifier, VouchError};

use crate::email;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    reply_to: &'a str,
    subject: String,
    html: String,
}

/// Sends one email per submission through `POST {api_base_url}/emails`.
#[derive(Debug, Clone)]
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    from: String,
    to: Vec<String>,
    site_name: String,
}

impl ResendNotifier {
    pub fn new(
        api_key: &str,
        config: &NotifierConfig,
        site_name: &str,
    ) -> Result<Self, VouchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                VouchError::Config(format!("invalid notifier API key header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VouchError::Notifier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_base_url.trim_end_matches('/')),
            from: config.from.clone(),
            to: config.to.clone(),
            site_name: site_name.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), VouchError> {
        let request = SendEmailRequest {
            from: &self.from,
            to: &self.to,
            reply_to: &submission.email,
            subject: email::subject(submission),
            html: email::html_body(submission, &self.site_name),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| VouchError::Notifier {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VouchError::Notifier {
                message: format!("email API returned {status}: {body}"),
                source: None,
            });
        }

        debug!(id = %submission.id, status = %status, "notification email accepted");
        Ok(())
    }
}
