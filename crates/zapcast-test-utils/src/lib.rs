// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Zapcast integration tests.
//!
//! Provides a deterministic [`MockProvider`] and a [`DispatchHarness`] that
//! seeds a temp-SQLite campaign, so pipeline tests run without external
//! services.

pub mod harness;
pub mod mock_provider;

pub use harness::{DispatchHarness, DispatchHarnessBuilder};
pub use mock_provider::MockProvider;
