// SPDX-License-Identifier: MPL-2.0
//! Turns drafts into signed events through a [`SigningAgent`].

use super::agent::SigningAgent;
use super::event::{Draft, SignedEvent, UnsignedEvent};
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{AgentError, SignError};
use std::fmt;
use std::sync::Arc;

/// Signs drafts on behalf of the identity held by an injected agent.
///
/// Failures are returned to the caller untouched: no retry, no timeout.
/// Whether to surface them (e.g. as an error toast) is up to the caller.
#[derive(Clone)]
pub struct EventSigner {
    agent: Arc<dyn SigningAgent>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl fmt::Debug for EventSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSigner")
            .field("diagnostics", &self.diagnostics.is_some())
            .finish_non_exhaustive()
    }
}

impl EventSigner {
    pub fn new(agent: Arc<dyn SigningAgent>) -> Self {
        Self {
            agent,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle for recording signing outcomes.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Signs `draft`.
    ///
    /// # Errors
    ///
    /// - [`SignError::NoIdentity`] if the agent has no identity to sign with
    /// - [`SignError::Declined`] if the agent refuses to sign
    /// - [`SignError::Agent`] for any other agent failure
    pub async fn sign(&self, draft: Draft) -> Result<SignedEvent, SignError> {
        let kind = draft.kind;
        match self.sign_draft(draft).await {
            Ok(event) => {
                log::debug!("signed event {} (kind {kind})", event.id);
                if let Some(handle) = &self.diagnostics {
                    handle.log_event_signed(kind, event.id.as_str());
                }
                Ok(event)
            }
            Err(err) => {
                log::warn!("failed to sign event of kind {kind}: {err}");
                if let Some(handle) = &self.diagnostics {
                    handle.log_signing_failed(kind, err.kind());
                }
                Err(err)
            }
        }
    }

    async fn sign_draft(&self, draft: Draft) -> Result<SignedEvent, SignError> {
        let pubkey = match self.agent.public_key().await {
            Ok(Some(pubkey)) => pubkey,
            Ok(None) | Err(AgentError::Unavailable) => return Err(SignError::NoIdentity),
            Err(err) => return Err(err.into()),
        };

        let event = UnsignedEvent::from_draft(draft, pubkey, chrono::Utc::now().timestamp());
        let id = event.id()?;
        let sig = self.agent.sign(&event, &id).await?;

        Ok(SignedEvent::assemble(event, id, sig))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::signer::event::{EventId, PublicKey, Signature, Tag};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const PUBKEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    struct FakeAgent {
        identity: Result<Option<PublicKey>, AgentError>,
        reply: Result<Signature, AgentError>,
        signed: Mutex<Vec<EventId>>,
    }

    impl FakeAgent {
        fn signing() -> Self {
            Self {
                identity: Ok(Some(PUBKEY.parse().unwrap())),
                reply: Ok("ab".repeat(64).parse().unwrap()),
                signed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SigningAgent for FakeAgent {
        async fn public_key(&self) -> Result<Option<PublicKey>, AgentError> {
            self.identity.clone()
        }

        async fn sign(&self, _event: &UnsignedEvent, id: &EventId) -> Result<Signature, AgentError> {
            self.signed.lock().unwrap().push(id.clone());
            self.reply.clone()
        }
    }

    fn draft() -> Draft {
        Draft::new(1, "Open house on Saturday")
            .with_tag(Tag::new(["t", "realestate"]))
            .with_created_at(1_700_000_000)
    }

    #[tokio::test]
    async fn signed_event_carries_draft_identity_id_and_signature() {
        let agent = Arc::new(FakeAgent::signing());
        let signer = EventSigner::new(agent.clone());

        let event = signer.sign(draft()).await.unwrap();

        assert_eq!(event.kind, 1);
        assert_eq!(event.content, "Open house on Saturday");
        assert_eq!(event.tags, vec![Tag::new(["t", "realestate"])]);
        assert_eq!(event.created_at, 1_700_000_000);
        assert_eq!(event.pubkey.as_str(), PUBKEY);
        assert_eq!(event.sig.as_str(), "ab".repeat(64));
        assert!(event.verify_id());
        assert_eq!(*agent.signed.lock().unwrap(), vec![event.id.clone()]);
    }

    #[tokio::test]
    async fn missing_timestamp_is_stamped_with_now() {
        let signer = EventSigner::new(Arc::new(FakeAgent::signing()));
        let before = chrono::Utc::now().timestamp();

        let event = signer.sign(Draft::new(1, "now")).await.unwrap();

        let after = chrono::Utc::now().timestamp();
        assert!((before..=after).contains(&event.created_at));
    }

    #[tokio::test]
    async fn absent_identity_is_an_error_and_nothing_is_signed() {
        let agent = Arc::new(FakeAgent {
            identity: Ok(None),
            ..FakeAgent::signing()
        });
        let signer = EventSigner::new(agent.clone());

        let err = signer.sign(draft()).await.unwrap_err();

        assert_eq!(err, SignError::NoIdentity);
        assert!(agent.signed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_agent_means_no_identity() {
        let signer = EventSigner::new(Arc::new(FakeAgent {
            identity: Err(AgentError::Unavailable),
            ..FakeAgent::signing()
        }));

        assert_eq!(signer.sign(draft()).await, Err(SignError::NoIdentity));
    }

    #[tokio::test]
    async fn rejection_is_reported_as_declined() {
        let signer = EventSigner::new(Arc::new(FakeAgent {
            reply: Err(AgentError::Rejected("user cancelled".into())),
            ..FakeAgent::signing()
        }));

        assert_eq!(
            signer.sign(draft()).await,
            Err(SignError::Declined("user cancelled".into()))
        );
    }

    #[tokio::test]
    async fn identity_lookup_failure_propagates() {
        let signer = EventSigner::new(Arc::new(FakeAgent {
            identity: Err(AgentError::Other("extension crashed".into())),
            ..FakeAgent::signing()
        }));

        assert_eq!(
            signer.sign(draft()).await,
            Err(SignError::Agent("extension crashed".into()))
        );
    }

    #[tokio::test]
    async fn outcomes_are_recorded_in_diagnostics() {
        let mut collector = DiagnosticsCollector::default();
        let mut signer = EventSigner::new(Arc::new(FakeAgent::signing()));
        signer.set_diagnostics(collector.handle());
        let event = signer.sign(draft()).await.unwrap();

        let mut refusing = EventSigner::new(Arc::new(FakeAgent {
            identity: Ok(None),
            ..FakeAgent::signing()
        }));
        refusing.set_diagnostics(collector.handle());
        let _ = refusing.sign(draft()).await;

        collector.process_pending();
        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticEventKind::EventSigned {
                    kind: 1,
                    id: event.id.to_string(),
                },
                DiagnosticEventKind::SigningFailed {
                    kind: 1,
                    reason: "no_identity".into(),
                },
            ]
        );
    }
}
