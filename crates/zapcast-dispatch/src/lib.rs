// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session dispatch pipeline.
//!
//! Fans a campaign session's contacts out to per-contact dispatch tasks
//! under a bounded-concurrency semaphore, records one outbound message row
//! per contact, and finalizes the session status when the last outcome
//! arrives.

pub mod dispatcher;
pub mod scheduler;
pub mod tracker;

pub use dispatcher::Dispatcher;
pub use scheduler::SessionScheduler;
pub use tracker::ProgressTracker;
