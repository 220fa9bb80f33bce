// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider client trait for the external messaging service.

use async_trait::async_trait;

use crate::error::ZapcastError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{MessageSid, SendRequest};

/// Client for the external messaging provider.
///
/// One call sends one templated message. A rejected or undeliverable send
/// fails with a descriptive [`ZapcastError::Provider`]; the pipeline does
/// not retry.
#[async_trait]
pub trait ProviderClient: PluginAdapter {
    /// Send one message and return the provider-assigned message id.
    async fn send(&self, request: &SendRequest) -> Result<MessageSid, ZapcastError>;
}
