use colored::*;
use hostmap_common::network::host::{HostRecord, HostStatus};

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn host_to_details(host: &HostRecord) -> Vec<Detail> {
    vec![
        ("IPv4".to_string(), host.ip.to_string().color(colors::IPV4_ADDR)),
        mac_to_detail(host.mac.as_deref()),
        status_to_detail(host.status),
        ("Source".to_string(), host.source.to_string().color(colors::SECONDARY)),
    ]
}

fn mac_to_detail(mac: Option<&str>) -> Detail {
    let value = match mac {
        Some(mac) => mac.color(colors::MAC_ADDR),
        None => "unknown".dimmed(),
    };
    ("MAC".to_string(), value)
}

fn status_to_detail(status: HostStatus) -> Detail {
    let value = match status {
        HostStatus::Online => "online".color(colors::ONLINE).bold(),
        HostStatus::Offline => "offline".color(colors::OFFLINE),
    };
    ("Status".to_string(), value)
}
