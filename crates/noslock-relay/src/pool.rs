//! Multi-relay fan-out with a bounded wait.
//!
//! Publish is a broadcast: the first acknowledgement is success and the rest
//! keep replicating in the background. Fetch is a race: the first payload
//! with a well-formed shape wins. Both give up after `PoolConfig::timeout`.
//!
//! Dropping a publish or fetch future before it resolves cancels every
//! outstanding relay call, so a caller that has moved on never causes late
//! writes or observes late results.

use std::{sync::Arc, time::Duration};

use futures::stream::{FuturesUnordered, StreamExt};
use noslock_crypto::{DocumentId, payload};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::{Relay, RelayError};

/// Default bounded wait for publish and fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Pool configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on how long publish or fetch may take
    pub timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT }
    }
}

/// A set of independent relays queried together.
#[derive(Clone)]
pub struct RelayPool {
    relays: Vec<Arc<dyn Relay>>,
    config: PoolConfig,
}

impl RelayPool {
    /// Pool over `relays` with the given configuration.
    pub fn new(relays: Vec<Arc<dyn Relay>>, config: PoolConfig) -> Self {
        Self { relays, config }
    }

    /// Number of relays in the pool.
    pub fn len(&self) -> usize {
        self.relays.len()
    }

    /// True if the pool has no relays.
    pub fn is_empty(&self) -> bool {
        self.relays.is_empty()
    }

    /// Active configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Broadcast `payload` under `doc_id`.
    ///
    /// Returns the name of the first relay that acknowledged. Only then do
    /// the remaining publishes continue in the background. Dropping this
    /// future, or hitting the timeout, aborts every outstanding publish, so
    /// an abandoned flow leaves no record behind on slow relays.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `RecordTooLarge`: every relay refused the record for its size
    /// - `Unavailable`: no relay acknowledged, or none did in time
    pub async fn publish(&self, doc_id: &DocumentId, payload: &str) -> Result<String, RelayError> {
        let relays = self.relays.len();
        if relays == 0 {
            return Err(RelayError::Unavailable { relays });
        }

        let payload: Arc<str> = Arc::from(payload);
        let mut tasks = JoinSet::new();
        for relay in &self.relays {
            let relay = Arc::clone(relay);
            let payload = Arc::clone(&payload);
            let doc_id = *doc_id;
            tasks.spawn(async move {
                let result = relay.publish(&doc_id, &payload).await;
                (relay.name().to_string(), result)
            });
        }

        let mut refusals = Vec::new();
        let first_ack = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((name, Ok(()))) => return Some(name),
                    Ok((name, Err(err))) => {
                        warn!(relay = %name, %doc_id, error = %err, "publish failed");
                        if matches!(err, RelayError::RecordTooLarge { .. }) {
                            refusals.push(err);
                        }
                    },
                    Err(err) => warn!(%doc_id, error = %err, "publish task aborted"),
                }
            }
            None
        };
        let outcome = tokio::time::timeout(self.config.timeout, first_ack).await;

        match outcome {
            Ok(Some(name)) => {
                info!(relay = %name, %doc_id, "payload published");
                tokio::spawn(replicate(*doc_id, tasks));
                Ok(name)
            },
            Ok(None) if refusals.len() == relays => Err(refusals.swap_remove(0)),
            Ok(None) => Err(RelayError::Unavailable { relays }),
            Err(_) => {
                warn!(%doc_id, timeout = ?self.config.timeout, "publish timed out");
                tasks.abort_all();
                Err(RelayError::Unavailable { relays })
            },
        }
    }

    /// Fetch the payload stored under `doc_id` from whichever relay has it.
    ///
    /// Relays are queried concurrently. A payload that fails the shape check
    /// is only returned if no relay produced a well-formed one, so the
    /// decoder can report it as malformed rather than missing.
    ///
    /// # Errors
    ///
    /// - `NotFound`: at least one relay answered and none had the record
    /// - `Unavailable`: no relay answered before failing or timing out
    pub async fn fetch(&self, doc_id: &DocumentId) -> Result<String, RelayError> {
        let relays = self.relays.len();
        let mut pending: FuturesUnordered<_> = self
            .relays
            .iter()
            .map(|relay| async move { (relay.name(), relay.fetch(doc_id).await) })
            .collect();

        let mut answered = false;
        let mut malformed: Option<String> = None;

        let race = async {
            while let Some((name, result)) = pending.next().await {
                match result {
                    Ok(Some(found)) if payload::decode(&found).is_ok() => {
                        debug!(relay = name, %doc_id, "payload found");
                        return Some(found);
                    },
                    Ok(Some(found)) => {
                        warn!(relay = name, %doc_id, "relay returned malformed payload");
                        answered = true;
                        malformed.get_or_insert(found);
                    },
                    Ok(None) => {
                        debug!(relay = name, %doc_id, "relay has no record");
                        answered = true;
                    },
                    Err(err) => warn!(relay = name, %doc_id, error = %err, "fetch failed"),
                }
            }
            None
        };

        match tokio::time::timeout(self.config.timeout, race).await {
            Ok(Some(found)) => return Ok(found),
            Ok(None) => {},
            Err(_) => warn!(%doc_id, timeout = ?self.config.timeout, "fetch timed out"),
        }

        if let Some(found) = malformed {
            return Ok(found);
        }
        if answered { Err(RelayError::NotFound) } else { Err(RelayError::Unavailable { relays }) }
    }
}

/// Drain publishes still running after the first acknowledgement.
async fn replicate(doc_id: DocumentId, mut tasks: JoinSet<(String, Result<(), RelayError>)>) {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(()))) => debug!(relay = %name, %doc_id, "payload replicated"),
            Ok((name, Err(err))) => warn!(relay = %name, %doc_id, error = %err, "replication failed"),
            Err(err) => warn!(%doc_id, error = %err, "replication task aborted"),
        }
    }
}
