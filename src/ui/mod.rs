// SPDX-License-Identifier: MPL-2.0
//! User interface state shared with the rendering layer.
//!
//! - [`notifications`] - Toast notification system for user feedback

pub mod notifications;
