//! # Inventory Service
//!
//! Implements the "list hosts" use case.
//!
//! Orchestrates the identity sources for one snapshot:
//! 1. reads the lease journal and the reservation files while the active
//!    sweep runs over every configured range;
//! 2. merges the per-range sweep results;
//! 3. reverse-resolves the addresses nothing else names;
//! 4. hands everything to the pure [`reconcile`](crate::reconcile::reconcile).
//!
//! Nothing is cached between snapshots.

use std::sync::Arc;
use std::time::Instant;

use hostmap_common::config::Config;
use hostmap_common::network::host::HostRecord;
use tracing::{Instrument, info, info_span};

use crate::reconcile::{self, Sources};
use crate::scanner::resolver::{self, ReverseResolver};
use crate::scanner::{self, ActiveProbe};
use crate::sources;

pub struct InventoryService {
    config: Config,
    probe: Arc<dyn ActiveProbe>,
    resolver: Arc<dyn ReverseResolver>,
}

impl InventoryService {
    pub fn new(
        config: Config,
        probe: Arc<dyn ActiveProbe>,
        resolver: Arc<dyn ReverseResolver>,
    ) -> Self {
        Self {
            config,
            probe,
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds a fresh inventory, sorted by ascending IP.
    ///
    /// Never fails: with every source down the inventory is simply empty.
    pub async fn snapshot(&self) -> Vec<HostRecord> {
        let span = info_span!("snapshot");
        self.collect().instrument(span).await
    }

    async fn collect(&self) -> Vec<HostRecord> {
        let started = Instant::now();
        let cfg = &self.config;

        let (leases, reservations, sweep) = tokio::join!(
            sources::read_leases(&cfg.lease_file),
            sources::read_reservations(&cfg.reservation_files, &cfg.ranges),
            scanner::sweep(self.probe.clone(), &cfg.ranges, cfg.probe_timeout),
        );
        let active = scanner::merge_active(sweep);

        let sources = Sources {
            leases: &leases,
            reservations: &reservations,
            active: &active,
            ranges: &cfg.ranges,
        };

        let names = if cfg.no_dns {
            Default::default()
        } else {
            resolver::resolve_all(
                self.resolver.clone(),
                sources.unnamed(),
                cfg.dns_timeout,
                cfg.dns_concurrency,
            )
            .await
        };

        let hosts = reconcile::reconcile(&sources, |ip| names.get(&ip).cloned());

        info!(
            leases = leases.len(),
            reservations = reservations.len(),
            online = active.len(),
            resolved = names.len(),
            hosts = hosts.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Inventory reconciled"
        );

        hosts
    }
}
