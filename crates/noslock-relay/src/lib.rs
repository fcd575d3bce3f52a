//! Relay network adapter for Noslock
//!
//! Relays are untrusted, independent key-value nodes: a payload goes in under
//! a document identifier and may (or may not) come back out later. Nothing
//! here understands the payload beyond checking its shape.
//!
//! # Components
//!
//! - [`Relay`]: one node, publish-by-id and fetch-by-id
//! - [`MemoryRelay`]: in-process node for tests and simulation
//! - [`FileRelay`]: durable node backed by redb
//! - [`ChaoticRelay`]: fault-injecting wrapper for chaos tests
//! - [`RelayPool`]: fans calls out to N nodes with a bounded wait
//!
//! # Consistency
//!
//! Last write wins per identifier on each node. Nodes do not talk to each
//! other, so a payload is only as replicated as the publish fan-out made it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chaotic;
mod error;
mod file;
mod memory;
mod pool;

use async_trait::async_trait;
pub use chaotic::ChaoticRelay;
pub use error::RelayError;
pub use file::FileRelay;
pub use memory::MemoryRelay;
use noslock_crypto::DocumentId;
pub use pool::{DEFAULT_TIMEOUT, PoolConfig, RelayPool};

/// A single relay node.
///
/// Implementations must be cheap to share behind `Arc` and safe to call from
/// concurrent flows.
#[async_trait]
pub trait Relay: Send + Sync + 'static {
    /// Human-readable node name for logs.
    fn name(&self) -> &str;

    /// Store `payload` under `doc_id`, replacing any previous record.
    async fn publish(&self, doc_id: &DocumentId, payload: &str) -> Result<(), RelayError>;

    /// Record stored under `doc_id`, or `None` if this node has none.
    async fn fetch(&self, doc_id: &DocumentId) -> Result<Option<String>, RelayError>;
}
