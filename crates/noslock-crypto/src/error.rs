//! Errors for key generation, AEAD and payload encoding.

use thiserror::Error;

/// Failures of the cryptographic core.
///
/// The variants form a closed set. `AuthenticationFailed` deliberately covers
/// wrong keys, tampered ciphertext and corrupted data alike so callers cannot
/// build a decryption oracle out of the error kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The OS secure random source could not be used.
    ///
    /// Fatal for the calling operation. There is no fallback source.
    #[error("secure random source unavailable")]
    EntropyUnavailable,

    /// A key or nonce had the wrong length.
    #[error("invalid {parameter} length: expected {expected} bytes, got {actual}")]
    InvalidParameterLength {
        /// Which parameter was rejected (`"key"` or `"nonce"`)
        parameter: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Ciphertext shorter than the authentication tag.
    #[error("invalid ciphertext length: {actual} bytes is shorter than the tag")]
    InvalidCiphertextLength {
        /// Length that was supplied
        actual: usize,
    },

    /// Plaintext above the configured ceiling.
    #[error("payload too large: {len} bytes exceeds maximum of {max}")]
    PayloadTooLarge {
        /// Plaintext length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// MAC verification failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Stored payload does not match the v1 encoding.
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Which structural check failed
        reason: &'static str,
    },
}
