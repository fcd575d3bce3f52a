//! Write and read flows.
//!
//! `create`: size check → encrypt under fresh key/nonce/id → publish → link.
//! `open`: parse link → fetch → decode → decrypt.
//!
//! Both are plain async fns. Dropping the returned future abandons the flow:
//! outstanding fetches are cancelled and nothing is reported back.

use std::{fmt, sync::Arc};

use noslock_core::{
    Capability, LinkStyle, capability, decrypt_document_with, encrypt_document_with,
};
use noslock_crypto::{AeadCodec, DocumentId, EntropySource, OsEntropy, Zeroizing};
use noslock_relay::{Relay, RelayPool};
use tracing::{debug, info};

use crate::{config::ClientConfig, error::ClientError};

/// A freshly created paste.
pub struct ShareLink {
    /// Identifier the payload was published under
    pub doc_id: DocumentId,
    /// Capability link carrying the key. Wiped on drop
    pub url: Zeroizing<String>,
}

impl fmt::Debug for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareLink").field("doc_id", &self.doc_id).finish_non_exhaustive()
    }
}

/// Orchestrates the crypto core and the relay pool.
///
/// Holds no per-flow state, so one client can run any number of flows
/// concurrently.
pub struct PasteClient<E = OsEntropy> {
    codec: AeadCodec,
    link_style: LinkStyle,
    relays: RelayPool,
    entropy: E,
}

impl PasteClient<OsEntropy> {
    /// Client over `relays` using the OS RNG.
    pub fn new(relays: Vec<Arc<dyn Relay>>, config: ClientConfig) -> Self {
        Self::with_entropy(relays, config, OsEntropy)
    }
}

impl<E: EntropySource> PasteClient<E> {
    /// Client with an explicit entropy source.
    pub fn with_entropy(relays: Vec<Arc<dyn Relay>>, config: ClientConfig, entropy: E) -> Self {
        Self {
            codec: AeadCodec::new(config.max_plaintext_len),
            link_style: config.link_style,
            relays: RelayPool::new(relays, config.pool),
            entropy,
        }
    }

    /// Encrypt and publish `plaintext`, returning its capability link.
    ///
    /// Oversized input is rejected before any entropy is drawn or any relay
    /// is contacted.
    ///
    /// # Errors
    ///
    /// - `Crypto(PayloadTooLarge)`: plaintext above the configured ceiling
    /// - `Crypto(EntropyUnavailable)`: OS RNG failure
    /// - `Relay(RecordTooLarge)`: every relay refused the encoded record
    /// - `Relay(Unavailable)`: no relay acknowledged in time
    ///
    /// Dropping the returned future before it resolves abandons the publish
    /// on every relay.
    pub async fn create(&self, plaintext: &str) -> Result<ShareLink, ClientError> {
        self.codec.check_len(plaintext.len())?;

        let document = encrypt_document_with(&self.codec, &self.entropy, plaintext)?;
        debug!(doc_id = %document.doc_id, len = plaintext.len(), "document encrypted");

        self.relays.publish(&document.doc_id, &document.payload).await?;

        let url = capability::build_with_style(&self.link_style, &document.doc_id, &document.key);
        info!(doc_id = %document.doc_id, "paste created");

        Ok(ShareLink { doc_id: document.doc_id, url })
    }

    /// Fetch and decrypt the paste behind `url`.
    ///
    /// # Errors
    ///
    /// - `Link(_)`: link is structurally invalid
    /// - `Relay(NotFound)`: relays answered but none had the paste
    /// - `Relay(Unavailable)`: no relay answered in time
    /// - `Crypto(AuthenticationFailed | MalformedPayload)`: wrong key or
    ///   corrupted record
    pub async fn open(&self, url: &str) -> Result<Zeroizing<String>, ClientError> {
        let Capability { doc_id, key } = capability::parse(url)?;

        let payload = self.relays.fetch(&doc_id).await?;
        let plaintext = decrypt_document_with(&self.codec, &payload, &key)?;
        info!(%doc_id, "paste opened");

        Ok(plaintext)
    }
}
