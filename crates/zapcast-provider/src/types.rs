// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the Twilio-compatible Messages API.

use serde::Deserialize;

/// Successful response to a message-create call. Only the SID is consumed;
/// the remaining fields of the provider payload are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageCreatedResponse {
    pub sid: String,
}

/// Error payload returned by the provider on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: Option<i64>,
    pub message: String,
    #[serde(default)]
    pub status: Option<i64>,
}
