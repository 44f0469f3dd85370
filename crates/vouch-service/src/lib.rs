// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain services for the Vouch site backend.
//!
//! - [`ordering`]: position planning and the [`OrderingEngine`]
//! - [`testimonials`]: admin mutations through [`TestimonialService`]
//! - [`public`]: read-only listings for the public site
//! - [`contact`]: contact form intake
//! - [`tags`]: the display tag catalog

pub mod contact;
pub mod ordering;
pub mod public;
pub mod tags;
pub mod testimonials;

pub use contact::ContactService;
pub use ordering::OrderingEngine;
pub use public::{Page, PublicQuery, PublicReadSurface};
pub use tags::{ClassifiedTags, TagCatalog, normalize_tags};
pub use testimonials::TestimonialService;
