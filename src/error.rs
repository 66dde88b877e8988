// SPDX-License-Identifier: MPL-2.0
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The notification queue was created outside of a tokio runtime.
    #[error("No async runtime available to schedule notification expiry")]
    NoRuntime,

    #[error("Signing error: {0}")]
    Signing(#[from] SignError),
}

/// Failures reported by the signing adapter.
///
/// None of these are retried; the caller decides what to show the user.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SignError {
    /// No signing agent is installed, or it exposes no identity.
    #[error("no signing identity available")]
    NoIdentity,

    /// The agent refused to produce a signature.
    #[error("signing request declined: {0}")]
    Declined(String),

    /// The agent failed for another reason (transport, malformed reply...).
    #[error("signing agent failed: {0}")]
    Agent(String),

    /// The event could not be serialized for id derivation.
    #[error("event serialization failed: {0}")]
    Serialization(String),
}

impl SignError {
    /// Short machine-friendly label, used when recording diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SignError::NoIdentity => "no_identity",
            SignError::Declined(_) => "declined",
            SignError::Agent(_) => "agent",
            SignError::Serialization(_) => "serialization",
        }
    }
}

/// Failures reported by a signing agent implementation.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AgentError {
    /// The agent is not installed or not reachable.
    #[error("signing agent unavailable")]
    Unavailable,

    /// The user (or the agent's policy) refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("{0}")]
    Other(String),
}

impl From<AgentError> for SignError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Unavailable => SignError::Agent(err.to_string()),
            AgentError::Rejected(reason) => SignError::Declined(reason),
            AgentError::Other(message) => SignError::Agent(message),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(format!("{}", err), "I/O error: missing");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad value".into());
        assert_eq!(format!("{}", err), "Configuration error: bad value");
    }

    #[test]
    fn sign_error_converts_into_crate_error() {
        let err: Error = SignError::NoIdentity.into();
        assert_eq!(
            format!("{}", err),
            "Signing error: no signing identity available"
        );
    }

    #[test]
    fn agent_rejection_maps_to_declined() {
        let err: SignError = AgentError::Rejected("user said no".into()).into();
        assert_eq!(err, SignError::Declined("user said no".into()));
    }

    #[test]
    fn agent_unavailable_maps_to_agent_failure() {
        let err: SignError = AgentError::Unavailable.into();
        assert_eq!(err, SignError::Agent("signing agent unavailable".into()));
    }

    #[test]
    fn sign_error_kinds_are_distinct() {
        let kinds = [
            SignError::NoIdentity.kind(),
            SignError::Declined(String::new()).kind(),
            SignError::Agent(String::new()).kind(),
            SignError::Serialization(String::new()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
