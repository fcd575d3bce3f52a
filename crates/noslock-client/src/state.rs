//! Observable flow state for a paste UI.
//!
//! A UI renders exactly one of these at a time. It deliberately carries no
//! plaintext or key material: the UI keeps the result of a finished flow
//! itself and only needs to know which screen to show.

use crate::error::{ClientError, UserFacing};

/// Where a create or open flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Encrypting, publishing or fetching.
    Working,
    /// Flow finished successfully.
    Ready,
    /// Flow failed with the given outcome.
    Failed(UserFacing),
}

impl ViewState {
    /// State after a flow finished with `result`.
    pub fn finished<T>(result: &Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => Self::Ready,
            Err(err) => Self::Failed(err.user_facing()),
        }
    }

    /// True while a flow is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Working)
    }
}
