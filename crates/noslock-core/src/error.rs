//! Capability link errors.

use thiserror::Error;

/// A capability link that does not match the link grammar.
///
/// Checks run in declaration order and the first failure wins. Every
/// variant is shown to users as the same "invalid link" message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// No `#` fragment delimiter, so there is no key.
    #[error("link has no key fragment")]
    MissingKeyFragment,

    /// Key fragment is not 64 characters long.
    #[error("key fragment must be 64 characters, got {actual}")]
    InvalidKeyLength {
        /// Fragment length in bytes
        actual: usize,
    },

    /// Key fragment contains a non-hex character.
    #[error("key fragment is not hex")]
    InvalidKeyFormat,

    /// Document identifier missing or not 64 hex characters.
    #[error("invalid document id")]
    InvalidDocumentId,
}
