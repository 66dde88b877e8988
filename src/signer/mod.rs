// SPDX-License-Identifier: MPL-2.0
//! Event signing.
//!
//! The [`EventSigner`] resolves the user's identity from an injected
//! [`SigningAgent`], binds a [`Draft`] to it, derives the event id and asks
//! the agent for a signature.
//!
//! # Example
//!
//! ```no_run
//! use estate_client::signer::{Draft, EventSigner, SigningAgent, Tag};
//! use std::sync::Arc;
//!
//! # async fn demo(agent: Arc<dyn SigningAgent>) -> Result<(), estate_client::error::SignError> {
//! let signer = EventSigner::new(agent);
//! let draft = Draft::new(1, "Open house this Saturday").with_tag(Tag::new(["t", "realestate"]));
//! let event = signer.sign(draft).await?;
//! println!("{}", serde_json::to_string(&event).unwrap());
//! # Ok(())
//! # }
//! ```

mod adapter;
mod agent;
mod event;

pub use adapter::EventSigner;
pub use agent::SigningAgent;
pub use event::{
    Draft, EventId, InvalidHex, PublicKey, Signature, SignedEvent, Tag, UnsignedEvent,
};
