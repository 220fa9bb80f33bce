// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process session progress tracking.
//!
//! One entry per running session, shared between the scheduler (which seeds
//! it) and the dispatcher tasks (which record outcomes). State is process
//! local; an interrupted run leaves the session RUNNING with no recovery.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::warn;

use zapcast_core::types::SessionStatus;

#[derive(Debug)]
struct Entry {
    total: usize,
    done: usize,
    failed: usize,
}

/// Counts dispatch outcomes per session and decides the terminal status.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    entries: Mutex<HashMap<String, Entry>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking a session with `total` expected outcomes.
    pub async fn start(&self, session_id: &str, total: usize) {
        self.entries.lock().await.insert(
            session_id.to_string(),
            Entry {
                total,
                done: 0,
                failed: 0,
            },
        );
    }

    /// Record one outcome. Returns the terminal session status when this
    /// outcome was the last one; the entry is removed under the same lock,
    /// so finalization is observed exactly once.
    pub async fn record(&self, session_id: &str, failed: bool) -> Option<SessionStatus> {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.get_mut(session_id) else {
            warn!(session_id, "outcome recorded for untracked session");
            return None;
        };
        entry.done += 1;
        if failed {
            entry.failed += 1;
        }
        if entry.done < entry.total {
            return None;
        }
        let status = if entry.failed == entry.total {
            SessionStatus::Failed
        } else {
            SessionStatus::Completed
        };
        entries.remove(session_id);
        Some(status)
    }

    /// Whether the session still has outstanding outcomes.
    pub async fn is_tracking(&self, session_id: &str) -> bool {
        self.entries.lock().await.contains_key(session_id)
    }
}
