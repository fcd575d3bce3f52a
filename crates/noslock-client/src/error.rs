//! Client errors and their user-facing projection.
//!
//! Internally every failure keeps its precise kind. At the UI boundary all
//! kinds collapse into a handful of [`UserFacing`] outcomes with fixed
//! messages, so nothing shown to a user reveals which validation step
//! rejected a link or key.

use noslock_core::LinkError;
use noslock_crypto::CryptoError;
use noslock_relay::RelayError;
use thiserror::Error;

/// Any failure of a write or read flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Key generation, encryption, decryption or payload decoding failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The capability link is structurally invalid.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The relay network did not deliver.
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ClientError {
    /// The single outcome a UI should display for this error.
    pub fn user_facing(&self) -> UserFacing {
        match self {
            Self::Link(_) => UserFacing::InvalidLink,
            Self::Relay(RelayError::NotFound) => UserFacing::NotFound,
            Self::Relay(RelayError::RecordTooLarge { .. })
            | Self::Crypto(CryptoError::PayloadTooLarge { .. }) => UserFacing::TooLarge,
            Self::Relay(RelayError::Io(_) | RelayError::Unavailable { .. }) => {
                UserFacing::NetworkError
            },
            Self::Crypto(CryptoError::EntropyUnavailable) => UserFacing::CryptoUnavailable,
            Self::Crypto(
                CryptoError::AuthenticationFailed
                | CryptoError::MalformedPayload { .. }
                | CryptoError::InvalidParameterLength { .. }
                | CryptoError::InvalidCiphertextLength { .. },
            ) => UserFacing::DecryptFailed,
        }
    }

    /// Returns true if the orchestrator may retry the same call.
    ///
    /// Only relay outages qualify. Crypto and encoding failures are
    /// deterministic, so a retry would fail the same way.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Relay(err) if err.is_transient())
    }
}

/// Outcome categories shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserFacing {
    /// Link is malformed or missing its key
    InvalidLink,
    /// No paste stored under this link
    NotFound,
    /// Wrong key or corrupted paste
    DecryptFailed,
    /// Relays unreachable or timed out
    NetworkError,
    /// Text exceeds the size ceiling
    TooLarge,
    /// This device cannot produce secure random numbers
    CryptoUnavailable,
}

impl UserFacing {
    /// Fixed display message. Never includes inner error detail.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidLink => "This link is invalid.",
            Self::NotFound => "No paste exists for this link.",
            Self::DecryptFailed => "This paste could not be decrypted.",
            Self::NetworkError => "Could not reach the relay network. Try again later.",
            Self::TooLarge => "The text is too large to share.",
            Self::CryptoUnavailable => "Secure random numbers are unavailable on this device.",
        }
    }
}

impl std::fmt::Display for UserFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
