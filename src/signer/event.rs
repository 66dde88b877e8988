// SPDX-License-Identifier: MPL-2.0
//! Event model: drafts, unsigned events and signed events.
//!
//! Keys, ids and signatures are lowercase hex strings validated on
//! construction. The event id is the SHA-256 of the compact JSON array
//! `[0, pubkey, created_at, kind, tags, content]`.

use crate::error::SignError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Error returned when a hex field has the wrong length or alphabet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: expected {expected} hex characters")]
pub struct InvalidHex {
    field: &'static str,
    expected: usize,
}

macro_rules! hex_newtype {
    ($(#[$meta:meta])* $name:ident, $field:literal, $bytes:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Encoded length in hex characters.
            pub const HEX_LEN: usize = $bytes * 2;

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Builds the value from raw bytes.
            #[must_use]
            pub fn from_bytes(bytes: &[u8; $bytes]) -> Self {
                Self(hex::encode(bytes))
            }
        }

        impl FromStr for $name {
            type Err = InvalidHex;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let invalid = InvalidHex {
                    field: $field,
                    expected: Self::HEX_LEN,
                };
                if s.len() != Self::HEX_LEN {
                    return Err(invalid);
                }
                hex::decode(s).map_err(|_| invalid)?;
                Ok(Self(s.to_ascii_lowercase()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidHex;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

hex_newtype!(
    /// Public identity of a signer (32-byte x-only key).
    PublicKey,
    "public key",
    32
);
hex_newtype!(
    /// Content-derived event identifier (SHA-256).
    EventId,
    "event id",
    32
);
hex_newtype!(
    /// Signature produced by the signing agent (64 bytes).
    Signature,
    "signature",
    64
);

/// An event tag: a name followed by its values, e.g. `["t", "realestate"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// First element of the tag, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Everything after the name.
    #[must_use]
    pub fn values(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }
}

/// Unsigned description of an event, as provided by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub kind: u16,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Unix timestamp in seconds; stamped at signing time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Draft {
    pub fn new(kind: u16, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            tags: Vec::new(),
            created_at: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// A draft bound to an identity and a timestamp, ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedEvent {
    pub pubkey: PublicKey,
    pub created_at: i64,
    pub kind: u16,
    pub tags: Vec<Tag>,
    pub content: String,
}

impl UnsignedEvent {
    /// Binds `draft` to `pubkey`, using `now` when the draft has no timestamp.
    #[must_use]
    pub fn from_draft(draft: Draft, pubkey: PublicKey, now: i64) -> Self {
        Self {
            pubkey,
            created_at: draft.created_at.unwrap_or(now),
            kind: draft.kind,
            tags: draft.tags,
            content: draft.content,
        }
    }

    /// Compact JSON form hashed to obtain the event id.
    pub fn canonical_json(&self) -> Result<String, SignError> {
        serde_json::to_string(&(
            0,
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        ))
        .map_err(|e| SignError::Serialization(e.to_string()))
    }

    /// Derives the content-addressed event id.
    pub fn id(&self) -> Result<EventId, SignError> {
        let digest = Sha256::digest(self.canonical_json()?.as_bytes());
        Ok(EventId(hex::encode(digest)))
    }
}

/// A signed event: every draft field plus identity, id and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEvent {
    pub id: EventId,
    pub pubkey: PublicKey,
    pub created_at: i64,
    pub kind: u16,
    pub tags: Vec<Tag>,
    pub content: String,
    pub sig: Signature,
}

impl SignedEvent {
    pub(crate) fn assemble(event: UnsignedEvent, id: EventId, sig: Signature) -> Self {
        Self {
            id,
            pubkey: event.pubkey,
            created_at: event.created_at,
            kind: event.kind,
            tags: event.tags,
            content: event.content,
            sig,
        }
    }

    /// Returns the event without its id and signature.
    #[must_use]
    pub fn unsigned(&self) -> UnsignedEvent {
        UnsignedEvent {
            pubkey: self.pubkey.clone(),
            created_at: self.created_at,
            kind: self.kind,
            tags: self.tags.clone(),
            content: self.content.clone(),
        }
    }

    /// Checks that `id` matches the event content. The signature itself is
    /// not verified here.
    #[must_use]
    pub fn verify_id(&self) -> bool {
        self.unsigned().id().is_ok_and(|id| id == self.id)
    }
}
