// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-contact message dispatch.
//!
//! `process_contact` is infallible at the signature: every outcome, including
//! storage faults, lands in a message row and a tracker report so the session
//! can always finalize.

use std::sync::Arc;

use tracing::{error, info, warn};

use zapcast_core::types::{MessageId, MessageSid, MessageStatus, SendRequest};
use zapcast_core::{phone, variables, DataStore, ProviderClient, ZapcastError};

use crate::tracker::ProgressTracker;

/// Error text recorded when normalization rejects the contact's phone.
const INVALID_PHONE_ERROR: &str = "invalid phone";

pub struct Dispatcher {
    store: Arc<dyn DataStore>,
    provider: Arc<dyn ProviderClient>,
    tracker: Arc<ProgressTracker>,
    default_region: String,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn DataStore>,
        provider: Arc<dyn ProviderClient>,
        tracker: Arc<ProgressTracker>,
        default_region: String,
    ) -> Self {
        Self {
            store,
            provider,
            tracker,
            default_region,
        }
    }

    /// Dispatch one message for one contact and record the outcome.
    pub async fn process_contact(&self, session_id: &str, contact_id: &str, raw_phone: &str) {
        let to = match phone::normalize(raw_phone, &self.default_region) {
            Ok(to) => to,
            Err(e) => {
                warn!(session_id, contact_id, %e, "phone rejected, skipping send");
                if let Err(e) = self
                    .store
                    .create_message(
                        session_id,
                        contact_id,
                        MessageStatus::Failed,
                        Some(INVALID_PHONE_ERROR),
                    )
                    .await
                {
                    error!(session_id, contact_id, %e, "failed to record invalid-phone row");
                }
                self.report(session_id, true).await;
                return;
            }
        };

        // PENDING row marks that a send attempt started.
        let message_id = match self
            .store
            .create_message(session_id, contact_id, MessageStatus::Pending, None)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                error!(session_id, contact_id, %e, "failed to create pending row");
                self.report(session_id, true).await;
                return;
            }
        };

        match self.attempt_send(session_id, contact_id, &to).await {
            Ok(sid) => {
                if let Err(e) = self
                    .store
                    .update_message(&message_id, MessageStatus::Sent, Some(&sid.0), None)
                    .await
                {
                    error!(session_id, contact_id, %e, "failed to mark message sent");
                }
                self.report(session_id, false).await;
            }
            Err(e) => {
                warn!(session_id, contact_id, %e, "send failed");
                self.fail_message(&message_id, &e.to_string()).await;
                self.report(session_id, true).await;
            }
        }
    }

    /// Load everything the send needs and call the provider. Any error here
    /// is fatal for this contact only.
    async fn attempt_send(
        &self,
        session_id: &str,
        contact_id: &str,
        to: &str,
    ) -> Result<MessageSid, ZapcastError> {
        let contact =
            self.store
                .get_contact(contact_id)
                .await?
                .ok_or_else(|| ZapcastError::NotFound {
                    entity: "contact",
                    id: contact_id.to_string(),
                })?;
        let session =
            self.store
                .get_session(session_id)
                .await?
                .ok_or_else(|| ZapcastError::NotFound {
                    entity: "session",
                    id: session_id.to_string(),
                })?;
        let template = self
            .store
            .get_template_reference(&session.template_id)
            .await?
            .ok_or_else(|| ZapcastError::NotFound {
                entity: "template",
                id: session.template_id.clone(),
            })?;
        let brand = self
            .store
            .get_brand(&session.brand_id)
            .await?
            .ok_or_else(|| ZapcastError::NotFound {
                entity: "brand",
                id: session.brand_id.clone(),
            })?;
        let mappings = self.store.get_variable_mappings(session_id).await?;
        let statics = self.store.get_static_variables(session_id).await?;

        let request = SendRequest {
            to: to.to_string(),
            from: brand.sender(),
            template_id: template.provider_template_id,
            variables: variables::resolve(&contact, &statics, &mappings),
        };
        self.provider.send(&request).await
    }

    async fn fail_message(&self, message_id: &MessageId, error: &str) {
        if let Err(e) = self
            .store
            .update_message(message_id, MessageStatus::Failed, None, Some(error))
            .await
        {
            error!(%e, "failed to mark message failed");
        }
    }

    /// Report one outcome to the tracker and, on the last outcome, write the
    /// terminal session status. A status write failure is logged, never
    /// propagated.
    async fn report(&self, session_id: &str, failed: bool) {
        if let Some(status) = self.tracker.record(session_id, failed).await {
            match self.store.update_session_status(session_id, status).await {
                Ok(()) => info!(session_id, %status, "session finalized"),
                Err(e) => error!(session_id, %status, %e, "failed to write terminal status"),
            }
        }
    }
}
