//! Noslock Cryptographic Primitives
//!
//! Building blocks for capability links: random keys and identifiers,
//! authenticated encryption, and the stored payload encoding.
//!
//! # Write Path
//!
//! ```text
//! plaintext
//!    │   generate_key / generate_nonce / generate_document_id
//!    ▼
//! AeadCodec::encrypt → ciphertext (len + 16)
//!    │
//!    ▼
//! payload::encode → base64(nonce || ciphertext) → relay
//! ```
//!
//! The read path runs the same steps backwards, and every failure to verify
//! collapses into [`CryptoError::AuthenticationFailed`].
//!
//! # Security
//!
//! Nonces:
//! - 192-bit XChaCha20 nonces are drawn at random for every encryption
//! - The extended size makes random collisions negligible without a counter
//!
//! Key handling:
//! - [`SymmetricKey`] is zeroized on drop and never printed by `Debug`
//! - Decrypted plaintext is returned in a `Zeroizing` buffer
//! - Failed decryptions wipe their working buffer before returning
//!
//! Entropy:
//! - All randomness comes from the OS RNG behind [`ready`]
//! - A failing source is fatal. There is no weaker fallback

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
mod error;
pub mod keys;
pub mod payload;
pub mod random;

pub use aead::{AeadCodec, DEFAULT_MAX_PLAINTEXT_LEN, TAG_SIZE};
pub use error::CryptoError;
pub use keys::{
    DOCUMENT_ID_SIZE, DocumentId, HEX_LEN, InvalidDocumentId, KEY_SIZE, NONCE_SIZE, Nonce,
    SymmetricKey,
};
pub use payload::{DecodedPayload, MIN_PAYLOAD_LEN};
pub use random::{
    EntropySource, OsEntropy, generate_document_id, generate_document_id_from, generate_key,
    generate_key_from, generate_nonce, generate_nonce_from, ready,
};
pub use zeroize::Zeroizing;
