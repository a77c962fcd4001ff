//! # Identity Reconciliation
//!
//! Merges the passive identity sources and the active sweep into one inventory.
//!
//! The reconciler is a pure function of its inputs: it performs no I/O, keeps
//! no state between calls and cannot fail. Every source adapter has already
//! degraded its own failures to an empty map before reaching this point.
//!
//! ## Guarantees
//! * Every address seen by any source appears exactly once.
//! * Hostnames are unique across the output.
//! * Records are ordered by ascending numeric address.
//!
//! ## Name precedence
//! lease → static reservation → reverse DNS → `host-a-b-c-d`
//!
//! Suffixing for uniqueness depends on the visiting order: the lowest address
//! claiming a name keeps it bare, later claimants get `-2`, `-3`, ...

use std::collections::{BTreeSet, HashSet};
use std::net::Ipv4Addr;

use hostmap_common::network::host::{
    ActiveSet, HostRecord, HostSource, HostStatus, LeaseTable, ReservationTable,
};
use hostmap_common::network::scope::{self, NamedRange};

/// Placeholder some lease and PTR sources emit instead of a real name.
const DEGENERATE_NAME: &str = "for";

/// Per-call snapshot of every source, as handed to [`reconcile`].
pub struct Sources<'a> {
    pub leases: &'a LeaseTable,
    pub reservations: &'a ReservationTable,
    pub active: &'a ActiveSet,
    /// Used for `source` classification only.
    pub ranges: &'a [NamedRange],
}

impl Sources<'_> {
    /// Addresses that neither a lease nor a reservation names.
    ///
    /// These are the only ones worth a reverse lookup.
    pub fn unnamed(&self) -> Vec<Ipv4Addr> {
        self.all_ips()
            .into_iter()
            .filter(|ip| {
                usable(self.leases.get(ip)).is_none() && usable(self.reservations.get(ip)).is_none()
            })
            .collect()
    }

    fn all_ips(&self) -> BTreeSet<Ipv4Addr> {
        self.leases
            .keys()
            .chain(self.reservations.keys())
            .chain(self.active.keys())
            .copied()
            .collect()
    }
}

/// Builds the inventory.
///
/// `reverse` is consulted only for addresses without a usable lease or
/// reservation name.
pub fn reconcile<F>(sources: &Sources<'_>, mut reverse: F) -> Vec<HostRecord>
where
    F: FnMut(Ipv4Addr) -> Option<String>,
{
    let mut taken = NameRegistry::default();

    sources
        .all_ips()
        .into_iter()
        .map(|ip| {
            let candidate = usable(sources.leases.get(&ip))
                .or_else(|| usable(sources.reservations.get(&ip)))
                .map(str::to_string)
                .or_else(|| reverse(ip).filter(|name| usable(Some(name)).is_some()))
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| synthetic_name(ip));

            let (status, mac) = match sources.active.get(&ip) {
                Some(mac) => (HostStatus::Online, mac.clone()),
                None => (HostStatus::Offline, None),
            };

            HostRecord {
                hostname: taken.claim(candidate),
                ip,
                status,
                mac,
                source: classify(sources, ip),
            }
        })
        .collect()
}

/// `host-10-1-1-7` for `10.1.1.7`.
pub fn synthetic_name(ip: Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("host-{a}-{b}-{c}-{d}")
}

fn usable(name: Option<&String>) -> Option<&str> {
    name.map(|name| name.trim())
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(DEGENERATE_NAME))
}

fn classify(sources: &Sources<'_>, ip: Ipv4Addr) -> HostSource {
    if sources.leases.contains_key(&ip) {
        return HostSource::Lease;
    }
    if let Some(range) = scope::managed_range_of(sources.ranges, ip) {
        return HostSource::ActiveRange(range.name.clone());
    }
    if sources.reservations.contains_key(&ip) {
        return HostSource::Static;
    }
    HostSource::Unknown
}

/// Hostnames handed out during one reconciliation.
#[derive(Default)]
struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    /// Returns `base`, or `base-N` for the first free `N >= 2`, and reserves it.
    fn claim(&mut self, base: String) -> String {
        let name = if self.names.contains(&base) {
            (2u64..)
                .map(|n| format!("{base}-{n}"))
                .find(|name| !self.names.contains(name))
                .unwrap_or_else(|| base.clone())
        } else {
            base
        };
        self.names.insert(name.clone());
        name
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
