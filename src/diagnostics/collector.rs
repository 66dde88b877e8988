// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! This module provides the central collector that receives events from
//! the notification queue and the signing adapter and keeps the most recent
//! ones in memory.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

use super::{DiagnosticEvent, DiagnosticEventKind};
use crate::config::{
    Config, DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};
use crate::ui::notifications::Severity;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Events are sent via a bounded channel so callers never block.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records that a toast was shown.
    pub fn log_notification_shown(&self, id: u64, severity: Severity) {
        self.send(DiagnosticEventKind::NotificationShown { id, severity });
    }

    /// Records that a toast left the queue.
    pub fn log_notification_removed(&self, id: u64) {
        self.send(DiagnosticEventKind::NotificationRemoved { id });
    }

    /// Records an error surfaced by `source`.
    pub fn log_error(&self, source: impl Into<String>, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Error {
            source: source.into(),
            message: message.into(),
        });
    }

    /// Records a successfully signed event.
    pub fn log_event_signed(&self, kind: u16, id: impl Into<String>) {
        self.send(DiagnosticEventKind::EventSigned {
            kind,
            id: id.into(),
        });
    }

    /// Records a signing failure.
    pub fn log_signing_failed(&self, kind: u16, reason: impl Into<String>) {
        self.send(DiagnosticEventKind::SigningFailed {
            kind,
            reason: reason.into(),
        });
    }

    /// Attempts to send an event, returning an error if the channel is full
    /// or the collector is gone.
    pub fn try_send(&self, kind: DiagnosticEventKind) -> Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }

    fn send(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        if let Err(TrySendError::Full(event)) = self.try_send(kind) {
            log::debug!("diagnostics channel full, dropping {:?}", event.kind);
        }
    }
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Central collector for diagnostic events.
///
/// The collector owns the retained events and the receiving side of the
/// event channel. Call [`DiagnosticsCollector::process_pending`] to move
/// queued events into the history; once `capacity` events are held, each
/// new event evicts the oldest.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    events: VecDeque<DiagnosticEvent>,
    capacity: usize,
    event_rx: Receiver<DiagnosticEvent>,
    /// Sender stored to create handles.
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a collector retaining up to `capacity` events.
    ///
    /// The capacity is clamped to the bounds accepted in `settings.toml`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(
            MIN_DIAGNOSTICS_BUFFER_CAPACITY,
            MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        );
        let (event_tx, event_rx) = mpsc::channel(DEFAULT_CHANNEL_CAPACITY);

        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Creates a collector sized by the `diagnostics_capacity` setting.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.diagnostics_capacity())
    }

    /// Drains the event channel into the retained history.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            if self.events.len() == self.capacity {
                self.events.pop_front();
            }
            self.events.push_back(event);
        }
    }

    /// Number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.events.iter()
    }

    /// Drops every retained event. Events still queued in the channel are kept.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Maximum number of events retained before the oldest are evicted.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns how long the collector has been running.
    #[must_use]
    pub fn collection_duration(&self) -> Duration {
        self.collection_started_at.elapsed()
    }

    /// Exports all collected events as a JSON report.
    ///
    /// Event timestamps are expressed as milliseconds since the collector
    /// was created.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    #[allow(clippy::cast_possible_truncation)] // Durations in ms fit comfortably in u64
    fn build_report(&self) -> Report<'_> {
        let events = self
            .events
            .iter()
            .map(|event| ReportEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                event: &event.kind,
            })
            .collect();

        Report {
            started_at: self.collection_started_at_utc.to_rfc3339(),
            duration_ms: self.collection_duration().as_millis() as u64,
            event_count: self.events.len(),
            events,
        }
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

#[derive(Serialize)]
struct Report<'a> {
    started_at: String,
    duration_ms: u64,
    event_count: usize,
    events: Vec<ReportEvent<'a>>,
}

#[derive(Serialize)]
struct ReportEvent<'a> {
    offset_ms: u64,
    #[serde(flatten)]
    event: &'a DiagnosticEventKind,
}
