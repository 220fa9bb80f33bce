// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded-concurrency session scheduling.
//!
//! One tokio task per contact, gated by a process-wide semaphore so at most
//! `concurrency` provider calls run at once across all sessions.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use zapcast_config::model::DispatchConfig;
use zapcast_core::types::SessionStatus;
use zapcast_core::{DataStore, ProviderClient, ZapcastError};

use crate::dispatcher::Dispatcher;
use crate::tracker::ProgressTracker;

pub struct SessionScheduler {
    store: Arc<dyn DataStore>,
    dispatcher: Arc<Dispatcher>,
    tracker: Arc<ProgressTracker>,
    semaphore: Arc<Semaphore>,
}

impl SessionScheduler {
    pub fn new(
        store: Arc<dyn DataStore>,
        provider: Arc<dyn ProviderClient>,
        config: &DispatchConfig,
    ) -> Self {
        let tracker = Arc::new(ProgressTracker::new());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&store),
            provider,
            Arc::clone(&tracker),
            config.default_region.clone(),
        ));
        Self {
            store,
            dispatcher,
            tracker,
            semaphore: Arc::new(Semaphore::new(config.concurrency)),
        }
    }

    /// Progress tracker shared with the dispatcher tasks.
    pub fn tracker(&self) -> &Arc<ProgressTracker> {
        &self.tracker
    }

    /// Fan a session's contacts out to dispatch tasks.
    ///
    /// Only the contact-list read (and the empty-session status write)
    /// propagate errors to the caller. Task-level failures are absorbed by
    /// the dispatcher and surface as FAILED message rows.
    pub async fn enqueue_session(&self, session_id: &str) -> Result<(), ZapcastError> {
        let contacts = self.store.find_contacts_by_session(session_id).await?;

        if contacts.is_empty() {
            self.store
                .update_session_status(session_id, SessionStatus::Completed)
                .await?;
            info!(session_id, "session has no contacts, completed immediately");
            return Ok(());
        }

        info!(session_id, contacts = contacts.len(), "session enqueued");
        self.tracker.start(session_id, contacts.len()).await;

        for contact in contacts {
            let dispatcher = Arc::clone(&self.dispatcher);
            let semaphore = Arc::clone(&self.semaphore);
            let session_id = session_id.to_string();
            tokio::spawn(async move {
                // Permit acquisition fails only if the semaphore is closed,
                // which never happens while the scheduler is alive.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                dispatcher
                    .process_contact(&session_id, &contact.id, &contact.phone)
                    .await;
            });
        }
        Ok(())
    }
}
