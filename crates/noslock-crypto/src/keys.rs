//! Key material and identifiers.
//!
//! `SymmetricKey` is the only secret type. It wipes itself when dropped, so
//! the copy handed back to a caller for link building is disposed of as soon
//! as the caller lets go of it.

use std::{fmt, str::FromStr};

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::CryptoError;

/// Size of an XChaCha20-Poly1305 key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of an XChaCha20 nonce in bytes (192 bits)
pub const NONCE_SIZE: usize = 24;

/// Size of a document identifier in bytes
pub const DOCUMENT_ID_SIZE: usize = 32;

/// Length of a hex-encoded key or document identifier
pub const HEX_LEN: usize = 64;

/// A 256-bit symmetric key.
///
/// Zeroized on drop. `Debug` never prints key bytes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy a key out of a slice.
    ///
    /// # Errors
    ///
    /// - `InvalidParameterLength` if the slice is not exactly `KEY_SIZE` bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidParameterLength {
                parameter: "key",
                expected: KEY_SIZE,
                actual: bytes.len(),
            }
        })?;
        Ok(Self(array))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding, wiped when dropped.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// A 192-bit XChaCha20 nonce. Public, but never reused under one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Wrap raw nonce bytes.
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// Public lookup key of a stored payload.
///
/// Displays as 64 lowercase hex characters. Parsing accepts either case.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; DOCUMENT_ID_SIZE]);

impl DocumentId {
    /// Wrap raw identifier bytes.
    pub fn from_bytes(bytes: [u8; DOCUMENT_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; DOCUMENT_ID_SIZE] {
        &self.0
    }

    /// Lowercase hex form used in links and as the relay key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.to_hex())
    }
}

/// Error returned when a string is not 64 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDocumentId;

impl fmt::Display for InvalidDocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document id must be {HEX_LEN} hex characters")
    }
}

impl std::error::Error for InvalidDocumentId {}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidDocumentId);
        }

        let mut bytes = [0u8; DOCUMENT_ID_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidDocumentId)?;
        Ok(Self(bytes))
    }
}
