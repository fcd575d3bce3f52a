//! Redb-backed durable relay node.
//!
//! Uses Redb's ACID transactions with Copy-on-Write for crash safety. Every
//! call runs on tokio's blocking pool so disk I/O never stalls the runtime.

use std::{fmt::Display, path::Path, sync::Arc};

use async_trait::async_trait;
use noslock_crypto::DocumentId;
use redb::{Database, TableDefinition};

use crate::{Relay, RelayError};

/// Table: payloads
/// Key: document id bytes [32 bytes]
/// Value: encoded payload string
const PAYLOADS: TableDefinition<&[u8], &str> = TableDefinition::new("payloads");

/// Durable relay node backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct FileRelay {
    name: String,
    db: Arc<Database>,
}

impl FileRelay {
    /// Open or create a node database at `path`.
    ///
    /// The node is named after the path for logging.
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RelayError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(io)?;

        let txn = db.begin_write().map_err(io)?;
        {
            let _ = txn.open_table(PAYLOADS).map_err(io)?;
        }
        txn.commit().map_err(io)?;

        Ok(Self { name: path.display().to_string(), db: Arc::new(db) })
    }
}

#[async_trait]
impl Relay for FileRelay {
    fn name(&self) -> &str {
        &self.name
    }

    async fn publish(&self, doc_id: &DocumentId, payload: &str) -> Result<(), RelayError> {
        let db = Arc::clone(&self.db);
        let key = *doc_id.as_bytes();
        let payload = payload.to_string();

        tokio::task::spawn_blocking(move || -> Result<(), RelayError> {
            let txn = db.begin_write().map_err(io)?;
            {
                let mut table = txn.open_table(PAYLOADS).map_err(io)?;
                table.insert(key.as_slice(), payload.as_str()).map_err(io)?;
            }
            txn.commit().map_err(io)
        })
        .await
        .map_err(io)?
    }

    async fn fetch(&self, doc_id: &DocumentId) -> Result<Option<String>, RelayError> {
        let db = Arc::clone(&self.db);
        let key = *doc_id.as_bytes();

        tokio::task::spawn_blocking(move || -> Result<Option<String>, RelayError> {
            let txn = db.begin_read().map_err(io)?;
            let table = txn.open_table(PAYLOADS).map_err(io)?;

            let payload = table.get(key.as_slice()).map_err(io)?.map(|v| v.value().to_string());
            Ok(payload)
        })
        .await
        .map_err(io)?
    }
}

fn io(err: impl Display) -> RelayError {
    RelayError::Io(err.to_string())
}
