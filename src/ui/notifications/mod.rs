// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to inform users about actions (event
//! published, upload failed, ...) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for ordering, expiry and change propagation
//!
//! # Usage
//!
//! ```no_run
//! use estate_client::ui::notifications::Manager;
//!
//! # async fn demo() -> estate_client::error::Result<()> {
//! let toasts = Manager::current()?;
//!
//! // The rendering layer observes the full list
//! let subscription = toasts.subscribe(|items| {
//!     for toast in items {
//!         println!("[{}] {}", toast.severity(), toast.message());
//!     }
//! });
//!
//! let id = toasts.success("Event published");
//! toasts.remove(id);
//! subscription.unsubscribe();
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior
//!
//! - Display order is insertion order, regardless of severity
//! - Every notification expires 5s after creation unless removed first
//! - Removing an unknown id is a no-op, so expiry and dismissal never race

mod manager;
mod notification;

pub use manager::{Manager, Message as NotificationMessage, Subscription};
pub use notification::{Notification, NotificationId, Severity};
