//! The **abstraction** for active liveness sweeps.
//!
//! High-level code depends on [`ActiveProbe`] only. The production
//! implementation ([`nmap::NmapProbe`]) shells out to an external scan utility,
//! while tests substitute deterministic fixtures.
//!
//! Liveness is best effort. A probe error, a timeout or even a panicking probe
//! task costs the sweep exactly one range and is otherwise invisible.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::error::SourceError;
use hostmap_common::network::host::ActiveSet;
use hostmap_common::network::scope::NamedRange;
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub mod nmap;
pub mod resolver;

/// Sweeps one range for live hosts.
#[async_trait]
pub trait ActiveProbe: Send + Sync {
    /// Returns every responding host in `range` with its MAC when known.
    ///
    /// Implementations should give up after `timeout`; the sweep enforces the
    /// same bound independently.
    async fn probe(&self, range: &NamedRange, timeout: Duration) -> Result<ActiveSet, SourceError>;
}

/// Probes every range concurrently, one task per range.
///
/// Waits for all tasks to finish or time out. Results come back in the order
/// of `ranges`; a failed range yields an empty set.
pub async fn sweep(
    probe: Arc<dyn ActiveProbe>,
    ranges: &[NamedRange],
    timeout: Duration,
) -> Vec<(String, ActiveSet)> {
    let mut tasks = JoinSet::new();

    for (idx, range) in ranges.iter().cloned().enumerate() {
        let probe = probe.clone();
        tasks.spawn(async move {
            let result = match tokio::time::timeout(timeout, probe.probe(&range, timeout)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::ProbeTimedOut {
                    range: range.name.clone(),
                    timeout,
                }),
            };
            (idx, range.name, result)
        });
    }

    let mut slots: Vec<Option<ActiveSet>> = vec![None; ranges.len()];

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, name, Ok(found))) => {
                debug!("Range {name}: {} hosts online", found.len());
                slots[idx] = Some(found);
            }
            Ok((_, _, Err(e))) => warn!("{e}"),
            Err(e) => warn!("Probe task aborted: {e}"),
        }
    }

    ranges
        .iter()
        .zip(slots)
        .map(|(range, found)| (range.name.clone(), found.unwrap_or_default()))
        .collect()
}

/// Folds per-range results into one map; later ranges override earlier ones.
pub fn merge_active(sets: Vec<(String, ActiveSet)>) -> ActiveSet {
    let mut merged = ActiveSet::new();
    for (_, set) in sets {
        merged.extend(set);
    }
    merged
}
