// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin authentication for the Vouch console.
//!
//! Editors are listed in config with argon2 PHC password hashes. Sessions
//! are opaque random tokens held in memory, so a restart signs everyone out.

pub mod password;
pub mod provider;

pub use password::{hash_password, verify_password};
pub use provider::LocalAuthProvider;
