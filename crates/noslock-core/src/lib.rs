//! Noslock Core
//!
//! The operations a paste UI calls: encrypt a document, decrypt a fetched
//! payload, build a shareable capability link and parse one back.
//!
//! # Architecture
//!
//! Everything here is synchronous and holds no shared state, so any number
//! of flows may call it concurrently. Network access lives in
//! `noslock-relay` and sequencing lives in `noslock-client`.
//!
//! # Components
//!
//! - [`encrypt_document`] / [`decrypt_document`]: write and read halves
//! - [`capability::build`] / [`capability::parse`]: the link grammar
//! - [`LinkError`]: structurally invalid links

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod capability;
mod document;
mod error;

pub use capability::{Capability, LinkStyle};
pub use document::{
    EncryptedDocument, decrypt_document, decrypt_document_with, encrypt_document,
    encrypt_document_with,
};
pub use error::LinkError;
pub use noslock_crypto::{AeadCodec, CryptoError, DocumentId, SymmetricKey, Zeroizing};

/// Build a custom-scheme share link. See [`capability::build`].
pub fn build_share_url(doc_id: &DocumentId, key: &SymmetricKey) -> Zeroizing<String> {
    capability::build(doc_id, key)
}

/// Parse a share link of either form. See [`capability::parse`].
pub fn parse_share_url(url: &str) -> Result<Capability, LinkError> {
    capability::parse(url)
}
