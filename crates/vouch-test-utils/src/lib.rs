// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vouch integration testing.
//!
//! Provides an in-memory repository with write counting and failure
//! injection, a recording notifier, and a harness backed by a temporary
//! SQLite database.

pub mod harness;
pub mod memory_repository;
pub mod mock_notifier;

pub use harness::TestHarness;
pub use memory_repository::MemoryRepository;
pub use mock_notifier::MockNotifier;
