// SPDX-License-Identifier: MPL-2.0
//! `estate_client` is the client-side glue of the real-estate event publisher.
//!
//! It provides a toast notification queue for user feedback, an adapter that
//! signs outgoing events through an injected signing agent, and the packaged
//! static assets (map style) together with build-mode dependent base paths.

#![doc(html_root_url = "https://docs.rs/estate_client/0.1.0")]

pub mod assets;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod signer;
pub mod ui;
