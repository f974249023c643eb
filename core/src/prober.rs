//! # Reachability Prober
//!
//! Implements the core "which of these hosts answer" use case.
//!
//! One bounded, concurrent check per listed target: the local host is
//! stripped first, every surviving target gets exactly one check with an
//! individual deadline, the engine waits for all of them to settle, and
//! only the targets whose check completed **and** succeeded make the
//! result. Hosts that time out, refuse, or never resolve are silently
//! absent; the only hard failure is a platform that cannot issue
//! non-blocking checks at all, raised before the first check goes out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;

use reachr_common::error::ProbeError;
use reachr_common::probe::target::{self, TargetList};
use reachr_common::warn;

use crate::check::CheckProbe;

pub const DEFAULT_CONCURRENCY_LIMIT: usize = 100;
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_millis(120);

/// How often the fan-in loop looks at the stop signal while no check is
/// settling.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Inputs of one probe run.
#[derive(Clone, Copy, Debug)]
pub struct ProbeOptions {
    /// Maximum checks in flight at once. Enforced: issuance blocks once
    /// this many checks are outstanding and resumes as they settle.
    pub concurrency_limit: usize,
    /// Deadline applied to each individual check, not to the whole run.
    pub check_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }
}

/// External cancellation for a run in progress.
///
/// Scoped to the invocation it is handed to, so concurrent runs do not
/// interfere. Triggering releases every outstanding check and returns
/// whatever settled so far.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One settled (or abandoned) check, correlated back to its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub target: String,
    /// Whether the check finished. Success, failure and timeout all count;
    /// only a check that was never issued or was released early does not.
    pub completed: bool,
    pub succeeded: bool,
}

/// The simple contract: just the targets that answered, in issuance order.
pub async fn probe_hosts(
    targets: TargetList,
    opts: &ProbeOptions,
    probe: Arc<dyn CheckProbe>,
    stop: &StopSignal,
) -> Result<Vec<String>, ProbeError> {
    let outcomes = probe_outcomes(targets, opts, probe, stop).await?;
    Ok(successes(outcomes))
}

/// The full per-target view of one probe run.
///
/// Every target that was issued a check appears in exactly one outcome;
/// targets filtered out (the local host) appear in none.
pub async fn probe_outcomes(
    targets: TargetList,
    opts: &ProbeOptions,
    probe: Arc<dyn CheckProbe>,
    stop: &StopSignal,
) -> Result<Vec<CheckOutcome>, ProbeError> {
    probe.ensure_supported()?;

    let local_host: String = target::local_host_name().unwrap_or_else(|e| {
        warn!("could not determine local host name: {e}");
        String::new()
    });
    let filtered: Vec<String> = filter_local_host(targets, &local_host);
    if filtered.is_empty() {
        return Ok(Vec::new());
    }

    let mut outcomes: Vec<CheckOutcome> = filtered
        .iter()
        .map(|host| CheckOutcome {
            target: host.clone(),
            completed: false,
            succeeded: false,
        })
        .collect();

    let limiter = Arc::new(Semaphore::new(opts.concurrency_limit.max(1)));
    let mut in_flight: JoinSet<(usize, bool)> = JoinSet::new();

    for (idx, host) in filtered.into_iter().enumerate() {
        if stop.is_triggered() {
            break;
        }
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };

        let probe = probe.clone();
        let deadline: Duration = opts.check_timeout;
        in_flight.spawn(async move {
            let _permit = permit;
            let reachable: bool = match timeout(deadline, probe.probe(&host)).await {
                Ok(Ok(answered)) => answered,
                Ok(Err(_)) | Err(_) => false,
            };
            (idx, reachable)
        });
    }

    while !in_flight.is_empty() {
        if stop.is_triggered() {
            warn!("stop requested, releasing {} outstanding checks", in_flight.len());
            in_flight.abort_all();
            while let Some(joined) = in_flight.join_next().await {
                if let Ok((idx, reachable)) = joined {
                    settle(&mut outcomes, idx, reachable);
                }
            }
            break;
        }

        tokio::select! {
            joined = in_flight.join_next() => {
                match joined {
                    Some(Ok((idx, reachable))) => settle(&mut outcomes, idx, reachable),
                    Some(Err(join_err)) => {
                        if !join_err.is_cancelled() {
                            warn!("check task failed: {join_err}");
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::time::sleep(STOP_POLL_INTERVAL) => {}
        }
    }

    Ok(outcomes)
}

/// Strips every entry naming the machine the probe runs on. No checks are
/// ever issued against the local host.
fn filter_local_host(targets: TargetList, local_host: &str) -> Vec<String> {
    targets
        .into_iter()
        .filter(|candidate| !target::is_local_host(candidate, local_host))
        .collect()
}

fn settle(outcomes: &mut [CheckOutcome], idx: usize, reachable: bool) {
    if let Some(outcome) = outcomes.get_mut(idx) {
        outcome.completed = true;
        outcome.succeeded = reachable;
    }
}

/// Collapses outcomes to the success-only view, preserving issuance order
/// and duplicates.
fn successes(outcomes: Vec<CheckOutcome>) -> Vec<String> {
    outcomes
        .into_iter()
        .filter(|outcome| outcome.completed && outcome.succeeded)
        .map(|outcome| outcome.target)
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
