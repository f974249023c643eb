//! A scripted check primitive for exercising the prober without a network.
//!
//! Every issued check registers with the shared [`ProbeLedger`] on entry
//! and deregisters from a drop guard, so a test can assert that the
//! prober released exactly as many checks as it issued no matter how each
//! one ended (answer, timeout, or early release).

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reachr_common::error::ProbeError;
use reachr_core::check::CheckProbe;

#[derive(Clone, Copy, Debug)]
pub enum Verdict {
    /// Answers within its latency.
    Reachable,
    /// Settles within its latency, but reports the host down.
    Unreachable,
    /// Never settles on its own; only the per-check deadline ends it.
    Silent,
    /// The check itself errors out.
    Faulty,
}

#[derive(Clone, Copy, Debug)]
pub struct Behavior {
    pub verdict: Verdict,
    pub latency: Duration,
}

impl Behavior {
    pub fn reachable() -> Self {
        Self {
            verdict: Verdict::Reachable,
            latency: Duration::ZERO,
        }
    }

    pub fn reachable_after(latency: Duration) -> Self {
        Self {
            verdict: Verdict::Reachable,
            latency,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            verdict: Verdict::Unreachable,
            latency: Duration::ZERO,
        }
    }

    pub fn silent() -> Self {
        Self {
            verdict: Verdict::Silent,
            latency: Duration::ZERO,
        }
    }

    pub fn faulty() -> Self {
        Self {
            verdict: Verdict::Faulty,
            latency: Duration::ZERO,
        }
    }
}

#[derive(Default)]
pub struct ProbeLedger {
    issued: AtomicUsize,
    released: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ProbeLedger {
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Tracks one check from issuance to release.
struct CheckGuard {
    ledger: Arc<ProbeLedger>,
}

impl CheckGuard {
    fn open(ledger: Arc<ProbeLedger>) -> Self {
        ledger.issued.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = ledger.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        ledger.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        Self { ledger }
    }
}

impl Drop for CheckGuard {
    fn drop(&mut self) {
        self.ledger.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.ledger.released.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct FakeProbe {
    behaviors: HashMap<String, Behavior>,
    fallback: Behavior,
    supported: bool,
    pub ledger: Arc<ProbeLedger>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            fallback: Behavior::reachable(),
            supported: true,
            ledger: Arc::new(ProbeLedger::default()),
        }
    }

    /// Simulates a runtime without the non-blocking check primitive.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn on(mut self, target: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(target.to_string(), behavior);
        self
    }

    pub fn with_fallback(mut self, behavior: Behavior) -> Self {
        self.fallback = behavior;
        self
    }
}

#[async_trait]
impl CheckProbe for FakeProbe {
    fn ensure_supported(&self) -> Result<(), ProbeError> {
        if !self.supported {
            return Err(ProbeError::PlatformUnsupported {
                reason: "simulated pre-minimum runtime".to_string(),
            });
        }
        Ok(())
    }

    async fn probe(&self, target: &str) -> anyhow::Result<bool> {
        let _guard = CheckGuard::open(self.ledger.clone());
        let behavior: Behavior = self
            .behaviors
            .get(target)
            .copied()
            .unwrap_or(self.fallback);

        match behavior.verdict {
            Verdict::Silent => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(false)
            }
            Verdict::Reachable | Verdict::Unreachable | Verdict::Faulty => {
                if !behavior.latency.is_zero() {
                    tokio::time::sleep(behavior.latency).await;
                }
                match behavior.verdict {
                    Verdict::Reachable => Ok(true),
                    Verdict::Unreachable => Ok(false),
                    Verdict::Faulty => anyhow::bail!("synthetic check failure for {target}"),
                    Verdict::Silent => unreachable!(),
                }
            }
        }
    }
}
