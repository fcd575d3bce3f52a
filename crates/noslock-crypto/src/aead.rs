//! Document encryption using `XChaCha20-Poly1305`
//!
//! Calls are stateless and deterministic: the caller supplies the nonce, so
//! identical inputs give identical ciphertext. Associated data is always
//! empty.

use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, AeadInPlace, KeyInit},
};
use zeroize::Zeroizing;

use crate::{
    error::CryptoError,
    keys::{KEY_SIZE, NONCE_SIZE},
};

/// Poly1305 tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Default plaintext ceiling (128 KiB), sized to the relay record limit.
pub const DEFAULT_MAX_PLAINTEXT_LEN: usize = 128 * 1024;

/// Authenticated encryption with a configurable plaintext ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeadCodec {
    max_plaintext_len: usize,
}

impl Default for AeadCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLAINTEXT_LEN)
    }
}

impl AeadCodec {
    /// Codec rejecting plaintext longer than `max_plaintext_len` bytes.
    pub const fn new(max_plaintext_len: usize) -> Self {
        Self { max_plaintext_len }
    }

    /// Configured plaintext ceiling in bytes.
    pub const fn max_plaintext_len(&self) -> usize {
        self.max_plaintext_len
    }

    /// Check a plaintext length against the ceiling without encrypting.
    ///
    /// Lets the orchestrator reject oversized input before any network call.
    pub fn check_len(&self, len: usize) -> Result<(), CryptoError> {
        if len > self.max_plaintext_len {
            return Err(CryptoError::PayloadTooLarge { len, max: self.max_plaintext_len });
        }
        Ok(())
    }

    /// Encrypt `plaintext`. Output is `plaintext.len() + TAG_SIZE` bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidParameterLength`: key is not 32 bytes or nonce is not 24
    /// - `PayloadTooLarge`: plaintext exceeds the configured ceiling
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        nonce: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        check_params(nonce, key)?;
        self.check_len(plaintext.len())?;

        let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
        cipher
            .encrypt(XNonce::from_slice(nonce), plaintext)
            .map_err(|_| CryptoError::PayloadTooLarge {
                len: plaintext.len(),
                max: self.max_plaintext_len,
            })
    }

    /// Verify and decrypt `ciphertext`.
    ///
    /// The plaintext buffer is wiped when the returned value is dropped. On
    /// failure the working buffer is wiped before returning.
    ///
    /// # Errors
    ///
    /// - `InvalidParameterLength`: key is not 32 bytes or nonce is not 24
    /// - `InvalidCiphertextLength`: ciphertext shorter than the tag
    /// - `AuthenticationFailed`: wrong key, tampering or corruption
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        nonce: &[u8],
        key: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        check_params(nonce, key)?;
        if ciphertext.len() < TAG_SIZE {
            return Err(CryptoError::InvalidCiphertextLength { actual: ciphertext.len() });
        }

        let cipher = XChaCha20Poly1305::new(Key::from_slice(key));
        let mut buffer = Zeroizing::new(ciphertext.to_vec());
        cipher
            .decrypt_in_place(XNonce::from_slice(nonce), b"", &mut *buffer)
            .map_err(|_| CryptoError::AuthenticationFailed)?;

        Ok(buffer)
    }
}

fn check_params(nonce: &[u8], key: &[u8]) -> Result<(), CryptoError> {
    if key.len() != KEY_SIZE {
        return Err(CryptoError::InvalidParameterLength {
            parameter: "key",
            expected: KEY_SIZE,
            actual: key.len(),
        });
    }
    if nonce.len() != NONCE_SIZE {
        return Err(CryptoError::InvalidParameterLength {
            parameter: "nonce",
            expected: NONCE_SIZE,
            actual: nonce.len(),
        });
    }
    Ok(())
}
