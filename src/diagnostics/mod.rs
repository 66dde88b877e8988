// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! Components record what happened (toasts shown and removed, events signed,
//! signing failures) through a [`DiagnosticsHandle`]. The
//! [`DiagnosticsCollector`] keeps the most recent of these events, up to the
//! configured capacity, and can export them as JSON.
//!
//! Free-form text logging goes through the `log` facade; this module only
//! keeps structured events.

mod collector;
mod events;

pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
