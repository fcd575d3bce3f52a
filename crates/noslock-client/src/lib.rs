//! Noslock Client
//!
//! Sequences the crypto core and the relay network into the two flows a
//! paste UI needs, and projects every failure onto a small set of
//! user-facing outcomes.
//!
//! # Components
//!
//! - [`PasteClient`]: `create` (write flow) and `open` (read flow)
//! - [`ClientError`]: precise failure kinds, wrapping each layer's error
//! - [`UserFacing`]: what a user is shown for each failure
//! - [`ViewState`]: the screen a UI should render
//!
//! # Key Handling
//!
//! The key generated for a new paste never leaves the client except inside
//! [`ShareLink::url`], which is wiped on drop. Opened plaintext is likewise
//! returned in a zeroizing buffer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client;
mod config;
mod error;
mod state;

pub use client::{PasteClient, ShareLink};
pub use config::ClientConfig;
pub use error::{ClientError, UserFacing};
pub use noslock_core::LinkStyle;
pub use noslock_relay::{FileRelay, MemoryRelay, PoolConfig, Relay};
pub use state::ViewState;
