//! Chaotic relay wrapper for fault injection testing
//!
//! Relay wrapper that randomly fails operations and optionally delays them,
//! to test the pool's partial-failure and timeout handling. Chaos is seeded,
//! so a failing test replays identically.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use noslock_crypto::DocumentId;

use crate::{Relay, RelayError};

/// Chaotic relay wrapper that randomly injects failures
///
/// Delegates to an inner relay but fails a configured fraction of calls
/// with `RelayError::Io`. Clones share RNG state and counters.
#[derive(Clone)]
pub struct ChaoticRelay<R: Relay> {
    inner: R,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    /// Delay applied before every call
    latency: Duration,
    /// RNG state for deterministic chaos
    rng: Arc<Mutex<ChaoticRng>>,
    operation_count: Arc<AtomicUsize>,
}

/// Linear congruential generator. Fast, deterministic, not for secrets.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    fn next(&mut self) -> f64 {
        // LCG constants from Numerical Recipes
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<R: Relay> ChaoticRelay<R> {
    /// Wrap `inner` with a fixed default seed.
    ///
    /// `failure_rate` is clamped to [0.0, 1.0].
    pub fn new(inner: R, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Wrap `inner` with an explicit seed for reproducible chaos.
    pub fn with_seed(inner: R, failure_rate: f64, seed: u64) -> Self {
        Self {
            inner,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            latency: Duration::ZERO,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            operation_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delay every call by `latency` before it reaches the inner relay.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Underlying relay (for checking what actually landed).
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Total number of calls attempted.
    pub fn operation_count(&self) -> usize {
        self.operation_count.load(Ordering::Relaxed)
    }

    /// Count the call, wait out the latency, and roll for failure.
    async fn before_call(&self) -> Result<(), RelayError> {
        self.operation_count.fetch_add(1, Ordering::Relaxed);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let fail = self
            .rng
            .lock()
            .map(|mut rng| rng.next() < self.failure_rate)
            .unwrap_or(true);
        if fail {
            return Err(RelayError::Io("chaotic failure injection".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Relay> Relay for ChaoticRelay<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn publish(&self, doc_id: &DocumentId, payload: &str) -> Result<(), RelayError> {
        self.before_call().await?;
        self.inner.publish(doc_id, payload).await
    }

    async fn fetch(&self, doc_id: &DocumentId) -> Result<Option<String>, RelayError> {
        self.before_call().await?;
        self.inner.fetch(doc_id).await
    }
}
