//! Key, nonce and document identifier generation.
//!
//! All randomness goes through an [`EntropySource`]. Production code uses
//! [`OsEntropy`], which sits behind a one-time readiness check. Tests inject
//! their own source to exercise the failure path.

use std::sync::OnceLock;

use crate::{
    error::CryptoError,
    keys::{DOCUMENT_ID_SIZE, DocumentId, KEY_SIZE, NONCE_SIZE, Nonce, SymmetricKey},
};

/// Outcome of the first entropy probe, shared by every caller.
static READY: OnceLock<bool> = OnceLock::new();

/// Initialize-once readiness barrier for the random source.
///
/// The first call probes the OS entropy source and caches the result. Later
/// calls return the cached outcome without touching the OS. Safe to call
/// from any number of threads.
///
/// # Errors
///
/// - `EntropyUnavailable`: the OS source failed on the first probe
pub fn ready() -> Result<(), CryptoError> {
    let available = *READY.get_or_init(|| {
        let mut probe = [0u8; 1];
        getrandom::fill(&mut probe).is_ok()
    });

    if available { Ok(()) } else { Err(CryptoError::EntropyUnavailable) }
}

/// Source of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `buf` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// - `EntropyUnavailable` when the source cannot produce bytes. Callers
    ///   must abort; degrading to a weaker source is not allowed.
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), CryptoError>;
}

/// OS cryptographic RNG (getrandom).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        ready()?;
        getrandom::fill(buf).map_err(|_| CryptoError::EntropyUnavailable)
    }
}

/// Fresh 32-byte key from `entropy`.
pub fn generate_key_from(entropy: &impl EntropySource) -> Result<SymmetricKey, CryptoError> {
    let mut bytes = [0u8; KEY_SIZE];
    let result = entropy.fill_bytes(&mut bytes);
    // Owned by the key from here on, wiped on drop either way
    let key = SymmetricKey::from_bytes(bytes);
    zeroize::Zeroize::zeroize(&mut bytes);
    result.map(|()| key)
}

/// Fresh 24-byte nonce from `entropy`.
pub fn generate_nonce_from(entropy: &impl EntropySource) -> Result<Nonce, CryptoError> {
    let mut bytes = [0u8; NONCE_SIZE];
    entropy.fill_bytes(&mut bytes)?;
    Ok(Nonce::from_bytes(bytes))
}

/// Fresh 32-byte document identifier from `entropy`.
pub fn generate_document_id_from(entropy: &impl EntropySource) -> Result<DocumentId, CryptoError> {
    let mut bytes = [0u8; DOCUMENT_ID_SIZE];
    entropy.fill_bytes(&mut bytes)?;
    Ok(DocumentId::from_bytes(bytes))
}

/// Fresh key from the OS RNG.
pub fn generate_key() -> Result<SymmetricKey, CryptoError> {
    generate_key_from(&OsEntropy)
}

/// Fresh nonce from the OS RNG.
pub fn generate_nonce() -> Result<Nonce, CryptoError> {
    generate_nonce_from(&OsEntropy)
}

/// Fresh document identifier from the OS RNG.
pub fn generate_document_id() -> Result<DocumentId, CryptoError> {
    generate_document_id_from(&OsEntropy)
}
