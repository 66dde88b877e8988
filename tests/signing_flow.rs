// SPDX-License-Identifier: MPL-2.0
use async_trait::async_trait;
use estate_client::error::{AgentError, SignError};
use estate_client::signer::{
    Draft, EventId, EventSigner, PublicKey, Signature, SignedEvent, SigningAgent, Tag,
    UnsignedEvent,
};
use estate_client::ui::notifications::{Manager, Severity};
use std::sync::Arc;

const PUBKEY: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

/// Agent that signs with a deterministic fake signature derived from the id.
struct EchoAgent {
    unlocked: bool,
}

#[async_trait]
impl SigningAgent for EchoAgent {
    async fn public_key(&self) -> Result<Option<PublicKey>, AgentError> {
        Ok(self.unlocked.then(|| PUBKEY.parse().expect("valid key")))
    }

    async fn sign(&self, _event: &UnsignedEvent, id: &EventId) -> Result<Signature, AgentError> {
        format!("{id}{id}")
            .parse()
            .map_err(|e| AgentError::Other(format!("{e}")))
    }
}

async fn publish(signer: &EventSigner, toasts: &Manager, draft: Draft) -> Option<SignedEvent> {
    match signer.sign(draft).await {
        Ok(event) => {
            toasts.success("Event signed");
            Some(event)
        }
        Err(err) => {
            toasts.error(format!("Could not sign event: {err}"));
            None
        }
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn listing() -> Draft {
    Draft::new(30402, "3 bedroom house with garden")
        .with_tag(Tag::new(["d", "listing-42"]))
        .with_tag(Tag::new(["price", "450000", "EUR"]))
}

#[tokio::test]
async fn signed_event_round_trips_as_json() {
    init_logging();
    let signer = EventSigner::new(Arc::new(EchoAgent { unlocked: true }));

    let event = signer.sign(listing()).await.expect("signing should succeed");
    let json = serde_json::to_string(&event).expect("serialize");
    let back: SignedEvent = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, event);
    assert!(back.verify_id());
    assert_eq!(back.tags.len(), 2);
    assert_eq!(back.sig.as_str(), format!("{}{}", event.id, event.id));
}

#[tokio::test]
async fn successful_signing_can_be_reported_as_success_toast() {
    let toasts = Manager::current().expect("runtime available");
    let signer = EventSigner::new(Arc::new(EchoAgent { unlocked: true }));

    let event = publish(&signer, &toasts, listing()).await;

    assert!(event.is_some());
    let shown = toasts.snapshot();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].severity(), Severity::Success);
}

#[tokio::test]
async fn missing_identity_can_be_reported_as_error_toast() {
    init_logging();
    let toasts = Manager::current().expect("runtime available");
    let signer = EventSigner::new(Arc::new(EchoAgent { unlocked: false }));

    assert_eq!(signer.sign(listing()).await, Err(SignError::NoIdentity));

    let event = publish(&signer, &toasts, listing()).await;
    assert!(event.is_none());
    let shown = toasts.snapshot();
    assert_eq!(shown[0].severity(), Severity::Error);
    assert_eq!(
        shown[0].message(),
        "Could not sign event: no signing identity available"
    );
}
