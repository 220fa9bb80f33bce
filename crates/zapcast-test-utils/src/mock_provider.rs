// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderClient` with pre-configured outcomes,
//! enabling fast, CI-runnable tests without external API calls. Every send
//! request is recorded for assertions.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use zapcast_core::types::{AdapterType, HealthStatus, MessageSid, SendRequest};
use zapcast_core::{PluginAdapter, ProviderClient, ZapcastError};

enum Behavior {
    AlwaysSucceed,
    AlwaysFail(String),
    /// Outcomes popped FIFO; falls back to success when exhausted.
    Scripted(VecDeque<Result<String, String>>),
}

/// A mock provider that returns pre-configured send outcomes.
pub struct MockProvider {
    behavior: Mutex<Behavior>,
    requests: Arc<Mutex<Vec<SendRequest>>>,
    counter: Mutex<u64>,
}

impl MockProvider {
    /// Every send succeeds with a generated SID (`SM0`, `SM1`, ...).
    pub fn always_succeed() -> Self {
        Self::with_behavior(Behavior::AlwaysSucceed)
    }

    /// Every send fails with the given error message.
    pub fn always_fail(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::AlwaysFail(message.into()))
    }

    /// Sends consume the given outcomes in order (Ok = SID, Err = message).
    pub fn scripted(outcomes: Vec<Result<String, String>>) -> Self {
        Self::with_behavior(Behavior::Scripted(VecDeque::from(outcomes)))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            requests: Arc::new(Mutex::new(Vec::new())),
            counter: Mutex::new(0),
        }
    }

    /// All requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<SendRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_sid(&self) -> String {
        let mut counter = self.counter.lock().await;
        let sid = format!("SM{counter}");
        *counter += 1;
        sid
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ZapcastError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ZapcastError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn send(&self, request: &SendRequest) -> Result<MessageSid, ZapcastError> {
        self.requests.lock().await.push(request.clone());

        let mut behavior = self.behavior.lock().await;
        match &mut *behavior {
            Behavior::AlwaysSucceed => Ok(MessageSid(self.next_sid().await)),
            Behavior::AlwaysFail(message) => Err(ZapcastError::Provider {
                message: message.clone(),
                source: None,
            }),
            Behavior::Scripted(outcomes) => match outcomes.pop_front() {
                Some(Ok(sid)) => Ok(MessageSid(sid)),
                Some(Err(message)) => Err(ZapcastError::Provider {
                    message,
                    source: None,
                }),
                None => Ok(MessageSid(self.next_sid().await)),
            },
        }
    }
}
