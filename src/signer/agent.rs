// SPDX-License-Identifier: MPL-2.0
//! Signing agent capability.
//!
//! A signing agent is whatever holds the user's key: a browser extension,
//! a remote signer, a hardware device. The crate never sees the key; it only
//! asks the agent for the public identity and for signatures.

use super::event::{EventId, PublicKey, Signature, UnsignedEvent};
use crate::error::AgentError;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SigningAgent: Send + Sync {
    /// Returns the identity the agent signs for.
    ///
    /// `Ok(None)` means the agent is reachable but has no identity to offer
    /// (e.g. the user has not unlocked or configured it).
    async fn public_key(&self) -> Result<Option<PublicKey>, AgentError>;

    /// Signs the event identified by `id`.
    ///
    /// `event` is provided so the agent can show the user what is being
    /// signed; the signature covers `id`.
    async fn sign(&self, event: &UnsignedEvent, id: &EventId) -> Result<Signature, AgentError>;
}

#[async_trait]
impl<T: SigningAgent + ?Sized> SigningAgent for Arc<T> {
    async fn public_key(&self) -> Result<Option<PublicKey>, AgentError> {
        (**self).public_key().await
    }

    async fn sign(&self, event: &UnsignedEvent, id: &EventId) -> Result<Signature, AgentError> {
        (**self).sign(event, id).await
    }
}
