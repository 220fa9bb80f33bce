// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio-compatible messaging provider adapter.
//!
//! Implements [`zapcast_core::ProviderClient`] over the provider's
//! content-template message API. One HTTP call per message, no retries;
//! failure handling is the dispatcher's responsibility.

pub mod client;
pub mod types;

pub use client::TwilioClient;
