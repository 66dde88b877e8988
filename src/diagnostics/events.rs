// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events are recorded by the notification queue and the signing adapter so
//! that a session can be inspected after the fact.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::ui::notifications::Severity;

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A toast was appended to the queue.
    NotificationShown {
        id: u64,
        severity: Severity,
    },

    /// A toast left the queue, by expiry or dismissal.
    NotificationRemoved {
        id: u64,
    },

    /// Something went wrong and was surfaced to the user.
    Error {
        /// Component that reported the error (e.g. `notifications`, `signer`).
        source: String,
        message: String,
    },

    /// An event was signed successfully.
    EventSigned {
        kind: u16,
        /// Hex event id.
        id: String,
    },

    /// The signing adapter gave up on a draft.
    SigningFailed {
        kind: u16,
        /// Short failure label, see `SignError::kind`.
        reason: String,
    },
}
