//! # Host Inventory Model
//!
//! The output unit of a reconciliation and the intermediate maps the source
//! adapters hand to the reconciler. All of them are keyed by
//! [`Ipv4Addr`] in a [`BTreeMap`], so iterating any of them already walks
//! the addresses in ascending numeric order.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

/// Sentinel written in place of a MAC address nobody reported.
pub const UNKNOWN_MAC: &str = "unknown";

/// `ip → hostname` from the lease journal, last lease wins.
pub type LeaseTable = BTreeMap<Ipv4Addr, String>;

/// `ip → hostname` from the static reservation files.
pub type ReservationTable = BTreeMap<Ipv4Addr, String>;

/// `ip → mac` for every host the active probe saw in one range.
pub type ActiveSet = BTreeMap<Ipv4Addr, Option<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Online,
    Offline,
}

/// Which mechanism put the IP into the inventory (not necessarily its name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSource {
    Lease,
    Static,
    ActiveRange(String),
    Unknown,
}

impl HostSource {
    pub fn as_str(&self) -> &str {
        match self {
            HostSource::Lease => "DHCP",
            HostSource::Static => "STATIC",
            HostSource::ActiveRange(tag) => tag,
            HostSource::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HostSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    pub hostname: String,
    pub ip: Ipv4Addr,
    pub status: HostStatus,
    #[serde(serialize_with = "serialize_mac")]
    pub mac: Option<String>,
    pub source: HostSource,
}

impl HostRecord {
    pub fn is_online(&self) -> bool {
        self.status == HostStatus::Online
    }

    pub fn mac_or_unknown(&self) -> &str {
        self.mac.as_deref().unwrap_or(UNKNOWN_MAC)
    }
}

fn serialize_mac<S: Serializer>(mac: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(mac.as_deref().unwrap_or(UNKNOWN_MAC))
}
