use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use hostmap_common::network::host::{HostRecord, HostSource, HostStatus};
use hostmap_core::inventory::InventoryService;
use hostmap_core::scanner::resolver::DisabledResolver;

use crate::fixtures::{
    CLIENTS, DEVICES, FixtureProbe, FixtureResolver, LEASES, RangeScript, config_in, ip,
};

fn summary(hosts: &[HostRecord]) -> Vec<(String, String, &'static str, String)> {
    hosts
        .iter()
        .map(|h| {
            let status = if h.is_online() { "online" } else { "offline" };
            (h.ip.to_string(), h.hostname.clone(), status, h.source.to_string())
        })
        .collect()
}

/// Every source contributes, one probe range fails, reverse DNS fills gaps.
#[tokio::test]
async fn full_snapshot_from_all_sources() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), Some(LEASES), &[CLIENTS, DEVICES]);
    let probe = FixtureProbe::new([
        (
            "DHCP",
            RangeScript::Found(vec![
                (ip("10.1.1.120"), Some("3C:22:FB:10:00:01")),
                (ip("10.1.1.130"), None),
            ]),
        ),
        (
            "LAN",
            RangeScript::Found(vec![
                (ip("10.1.20.10"), Some("AA:BB:CC:00:00:01")),
                (ip("10.1.20.50"), None),
            ]),
        ),
        ("WiFi", RangeScript::Fail),
    ]);
    let resolver = Arc::new(FixtureResolver::new(&[
        (ip("10.1.20.50"), "cam.lan"),
        (ip("10.1.1.130"), "for"),
        (ip("10.1.20.10"), "never-asked.lan"),
    ]));

    let service = InventoryService::new(config, Arc::new(probe), resolver.clone());
    let hosts = service.snapshot().await;

    let expected = [
        ("10.1.1.120", "laptop-renamed", "online", "DHCP"),
        ("10.1.1.121", "printer", "offline", "DHCP"),
        ("10.1.1.122", "printer-2", "offline", "DHCP"),
        ("10.1.1.130", "host-10-1-1-130", "online", "UNKNOWN"),
        ("10.1.20.2", "switch-core", "offline", "LAN"),
        ("10.1.20.10", "nas", "online", "LAN"),
        ("10.1.20.30", "printer-3", "offline", "LAN"),
        ("10.1.20.50", "cam.lan", "online", "LAN"),
        ("10.1.30.44", "tablet", "offline", "WiFi"),
    ]
    .map(|(a, b, c, d)| (a.to_string(), b.to_string(), c, d.to_string()));

    assert_eq!(summary(&hosts), expected);
    assert_eq!(hosts[5].mac.as_deref(), Some("AA:BB:CC:00:00:01"));
    assert_eq!(resolver.asked(), [ip("10.1.1.130"), ip("10.1.20.50")]);
}

#[tokio::test]
async fn static_host_seen_by_probe() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), Some(""), &["host nas { fixed-address 10.1.20.10; }"]);
    config.no_dns = true;
    let probe = FixtureProbe::new([
        ("DHCP", RangeScript::Found(vec![])),
        ("LAN", RangeScript::Found(vec![(ip("10.1.20.10"), Some("AA:BB"))])),
        ("WiFi", RangeScript::Found(vec![])),
    ]);

    let service = InventoryService::new(config, Arc::new(probe), Arc::new(DisabledResolver));
    let hosts = service.snapshot().await;

    assert_eq!(
        hosts,
        vec![HostRecord {
            hostname: "nas".to_string(),
            ip: ip("10.1.20.10"),
            status: HostStatus::Online,
            mac: Some("AA:BB".to_string()),
            source: HostSource::ActiveRange("LAN".to_string()),
        }]
    );
}

#[tokio::test]
async fn no_dns_skips_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), None, &[]);
    config.no_dns = true;
    let probe = FixtureProbe::new([("LAN", RangeScript::Found(vec![(ip("10.1.20.7"), None)]))]);
    let resolver = Arc::new(FixtureResolver::new(&[(ip("10.1.20.7"), "named.lan")]));

    let service = InventoryService::new(config, Arc::new(probe), resolver.clone());
    let hosts = service.snapshot().await;

    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].hostname, "host-10-1-20-7");
    assert!(resolver.asked().is_empty());
}

#[tokio::test(start_paused = true)]
async fn hanging_range_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), None, &[]);
    config.probe_timeout = Duration::from_secs(10);
    let probe = FixtureProbe::new([
        ("DHCP", RangeScript::Hang),
        ("LAN", RangeScript::Found(vec![(ip("10.1.20.3"), Some("00:11"))])),
        ("WiFi", RangeScript::Found(vec![(ip("10.1.30.3"), None)])),
    ]);

    let service = InventoryService::new(
        config,
        Arc::new(probe),
        Arc::new(FixtureResolver::default()),
    );
    let hosts = service.snapshot().await;

    let ips: Vec<String> = hosts.iter().map(|h| h.ip.to_string()).collect();
    assert_eq!(ips, ["10.1.20.3", "10.1.30.3"]);
    assert!(hosts.iter().all(HostRecord::is_online));
}

#[tokio::test]
async fn every_source_down_is_an_empty_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), None, &[]);
    config.reservation_files = vec![dir.path().join("missing.conf")];
    let probe = FixtureProbe::new([]);

    let service = InventoryService::new(
        config,
        Arc::new(probe),
        Arc::new(FixtureResolver::default()),
    );

    assert!(service.snapshot().await.is_empty());
}

#[tokio::test]
async fn journal_read_mid_append_keeps_complete_leases() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(
        dir.path(),
        Some("lease 10.1.1.150 { client-hostname \"tv\"; }\nlease 10.1.1.151 {\n client-hostname \"cut"),
        &[CLIENTS],
    );
    let probe = FixtureProbe::new([]);

    let service = InventoryService::new(
        config,
        Arc::new(probe),
        Arc::new(FixtureResolver::default()),
    );
    let hosts = service.snapshot().await;

    let names: Vec<&str> = hosts.iter().map(|h| h.hostname.as_str()).collect();
    assert_eq!(names, ["tv", "nas", "tablet"]);
}

#[tokio::test]
async fn snapshots_are_stateless() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path(), Some(LEASES), &[CLIENTS, DEVICES]);
    let probe = FixtureProbe::new([("LAN", RangeScript::Found(vec![(ip("10.1.20.99"), None)]))]);

    let service = InventoryService::new(
        config,
        Arc::new(probe),
        Arc::new(FixtureResolver::default()),
    );
    let first = service.snapshot().await;
    let second = service.snapshot().await;

    assert_eq!(first, second);

    let names: HashSet<&str> = first.iter().map(|h| h.hostname.as_str()).collect();
    let ips: HashSet<_> = first.iter().map(|h| h.ip).collect();
    assert_eq!(names.len(), first.len());
    assert_eq!(ips.len(), first.len());
}
