//! Relay error types.

use thiserror::Error;

/// Errors from a single relay node or from the pool as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Node-level I/O failure (connection, disk, lock).
    #[error("relay I/O error: {0}")]
    Io(String),

    /// Node refused a record above its size limit.
    #[error("record of {len} bytes exceeds relay limit of {max}")]
    RecordTooLarge {
        /// Encoded payload length
        len: usize,
        /// Node's record limit
        max: usize,
    },

    /// Every node that answered had no record for the identifier.
    #[error("document not found")]
    NotFound,

    /// No node acknowledged or answered before failing or timing out.
    #[error("no relay reachable ({relays} tried)")]
    Unavailable {
        /// Number of relays attempted
        relays: usize,
    },
}

impl RelayError {
    /// Returns true if retrying the same call might succeed.
    ///
    /// `NotFound` and `RecordTooLarge` are answers, not outages.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outages_are_transient() {
        assert!(RelayError::Io("connection reset".to_string()).is_transient());
        assert!(RelayError::Unavailable { relays: 3 }.is_transient());
    }

    #[test]
    fn answers_are_not_transient() {
        assert!(!RelayError::NotFound.is_transient());
        assert!(!RelayError::RecordTooLarge { len: 10, max: 5 }.is_transient());
    }
}
