//! Best-effort reverse DNS.
//!
//! Only addresses that no lease or reservation names are ever looked up. Every
//! lookup is bounded on its own and only a fixed number run at once, so a dead
//! resolver can neither stall the inventory nor exhaust the blocking pool.

use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::error::SourceError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

#[async_trait]
pub trait ReverseResolver: Send + Sync {
    async fn reverse(&self, ip: Ipv4Addr) -> Result<String, SourceError>;
}

/// Reverse lookups through the operating system resolver (`getnameinfo`).
///
/// `getnameinfo` blocks and cannot be cancelled, so a timed-out lookup keeps
/// its blocking thread until the OS gives up. Each lookup holds a slot until
/// its thread returns, which caps the threads a dead resolver can pin.
pub struct SystemResolver {
    slots: Arc<Semaphore>,
}

impl SystemResolver {
    pub fn new(max_blocking: usize) -> Self {
        Self {
            slots: Arc::new(Semaphore::new(max_blocking.max(1))),
        }
    }
}

#[async_trait]
impl ReverseResolver for SystemResolver {
    async fn reverse(&self, ip: Ipv4Addr) -> Result<String, SourceError> {
        let failed = |reason: String| SourceError::ResolutionFailed { ip, reason };

        let slot = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let name = tokio::task::spawn_blocking(move || {
            let _slot = slot;
            dns_lookup::lookup_addr(&IpAddr::V4(ip))
        })
        .await
        .map_err(|e| failed(e.to_string()))?
        .map_err(|e| failed(e.to_string()))?;

        // Without a PTR record the resolver echoes the numeric address back.
        if name.parse::<IpAddr>().is_ok() {
            return Err(failed("no PTR record".to_string()));
        }
        Ok(name)
    }
}

/// Resolver used when reverse DNS is switched off.
pub struct DisabledResolver;

#[async_trait]
impl ReverseResolver for DisabledResolver {
    async fn reverse(&self, ip: Ipv4Addr) -> Result<String, SourceError> {
        Err(SourceError::ResolutionFailed {
            ip,
            reason: "reverse DNS disabled".to_string(),
        })
    }
}

/// Looks up every address, at most `max_in_flight` at a time, each bounded by
/// `timeout`.
///
/// Failed and timed-out lookups are simply absent from the result.
pub async fn resolve_all(
    resolver: Arc<dyn ReverseResolver>,
    ips: impl IntoIterator<Item = Ipv4Addr>,
    timeout: Duration,
    max_in_flight: usize,
) -> BTreeMap<Ipv4Addr, String> {
    let limit = Arc::new(Semaphore::new(max_in_flight.max(1)));
    let mut tasks = JoinSet::new();

    for ip in ips {
        let resolver = resolver.clone();
        let limit = limit.clone();
        tasks.spawn(async move {
            // The semaphore is never closed, so the permit is always granted.
            let _permit = limit.acquire_owned().await.ok();
            let result = match tokio::time::timeout(timeout, resolver.reverse(ip)).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::ResolutionFailed {
                    ip,
                    reason: format!("timed out after {}ms", timeout.as_millis()),
                }),
            };
            (ip, result)
        });
    }

    let mut names = BTreeMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((ip, Ok(name))) => {
                names.insert(ip, name);
            }
            Ok((_, Err(e))) => debug!("{e}"),
            Err(e) => debug!("Reverse lookup task aborted: {e}"),
        }
    }
    names
}
