//! Wire shape of the `/api/hosts` response.

use std::net::Ipv4Addr;

use hostmap_common::network::host::{HostRecord, HostSource, HostStatus};
use serde::Serialize;

/// Placeholder for the `disk` and `ram` columns, which this service never fills.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Serialize)]
pub struct HostsResponse<'a> {
    pub hosts: Vec<ApiHost<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ApiHost<'a> {
    pub hostname: &'a str,
    pub ip: Ipv4Addr,
    pub status: HostStatus,
    pub mac: &'a str,
    pub disk: &'static str,
    pub ram: &'static str,
    pub source: &'a HostSource,
}

impl<'a> From<&'a HostRecord> for ApiHost<'a> {
    fn from(host: &'a HostRecord) -> Self {
        Self {
            hostname: &host.hostname,
            ip: host.ip,
            status: host.status,
            mac: host.mac_or_unknown(),
            disk: NOT_AVAILABLE,
            ram: NOT_AVAILABLE,
            source: &host.source,
        }
    }
}

impl<'a> HostsResponse<'a> {
    pub fn new(hosts: &'a [HostRecord]) -> Self {
        Self {
            hosts: hosts.iter().map(ApiHost::from).collect(),
        }
    }
}
