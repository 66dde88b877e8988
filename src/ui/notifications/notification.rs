// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Identifier of a notification within its queue.
///
/// Ids are handed out by the queue in strictly increasing order, starting
/// at 1, and are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Wraps a raw id, e.g. one received back from the rendering layer.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual and semantic category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Something failed and the user should know.
    Error,
    /// Neutral information.
    #[default]
    Info,
}

impl Severity {
    /// Lowercase label, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification to be displayed to the user.
///
/// Notifications are immutable once created; only their membership in the
/// queue changes.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
    #[serde(skip)]
    created_at: Instant,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, message: String, severity: Severity) -> Self {
        Self {
            id,
            message,
            severity,
            created_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns when this notification was created.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the age of this notification.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_severity_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn severity_labels_match_serialization() {
        for severity in [Severity::Success, Severity::Error, Severity::Info] {
            let json = serde_json::to_string(&severity).expect("serialize severity");
            assert_eq!(json, format!("\"{}\"", severity.as_str()));
        }
    }

    #[test]
    fn notification_serializes_without_timestamp() {
        let notification =
            Notification::new(NotificationId::new(1), "Saved".into(), Severity::Success);

        let value = serde_json::to_value(&notification).expect("serialize notification");
        assert_eq!(
            value,
            serde_json::json!({ "id": 1, "message": "Saved", "severity": "success" })
        );
    }

    #[test]
    fn notification_ids_order_by_value() {
        assert!(NotificationId::new(1) < NotificationId::new(2));
        assert_eq!(NotificationId::new(9).value(), 9);
        assert_eq!(NotificationId::new(9).to_string(), "9");
    }
}
