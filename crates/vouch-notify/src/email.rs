// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering of the submission email.

use vouch_core::types::ContactSubmission;

pub fn subject(submission: &ContactSubmission) -> String {
    format!("New Contact Form Submission - {}", submission.inquiry_type)
}

/// HTML body listing every field. All user input is escaped.
pub fn html_body(submission: &ContactSubmission, site_name: &str) -> String {
    let organization = submission
        .organization
        .as_deref()
        .filter(|o| !o.trim().is_empty())
        .map(escape_html)
        .unwrap_or_else(|| "Not provided".to_string());
    let message = escape_html(&submission.message).replace('\n', "<br>");

    format!(
        "<h2>New Contact Form Submission</h2>\n\
         <p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> {email}</p>\n\
         <p><strong>Organization:</strong> {organization}</p>\n\
         <p><strong>Inquiry Type:</strong> {inquiry}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{message}</p>\n\
         <hr>\n\
         <p><small>Submitted from {site} website contact form</small></p>\n",
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        inquiry = escape_html(&submission.inquiry_type),
        site = escape_html(site_name),
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
