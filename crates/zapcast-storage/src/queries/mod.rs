// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL query modules, one per entity group.

pub mod catalog;
pub mod contacts;
pub mod messages;
pub mod sessions;
