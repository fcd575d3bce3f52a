//! Client configuration.

use noslock_core::LinkStyle;
use noslock_crypto::DEFAULT_MAX_PLAINTEXT_LEN;
use noslock_relay::PoolConfig;

/// Configuration for a [`crate::PasteClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Plaintext ceiling in bytes, checked before any network call
    pub max_plaintext_len: usize,
    /// Form of the links handed back by `create`
    pub link_style: LinkStyle,
    /// Relay fan-out settings
    pub pool: PoolConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_plaintext_len: DEFAULT_MAX_PLAINTEXT_LEN,
            link_style: LinkStyle::Scheme,
            pool: PoolConfig::default(),
        }
    }
}
