use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::config::Config;
use hostmap_common::error::SourceError;
use hostmap_common::network::host::ActiveSet;
use hostmap_common::network::scope::NamedRange;
use hostmap_core::scanner::ActiveProbe;
use hostmap_core::scanner::resolver::ReverseResolver;

pub enum RangeScript {
    Found(Vec<(Ipv4Addr, Option<&'static str>)>),
    Fail,
    Hang,
}

/// Probe answering from a per-range script instead of the network.
pub struct FixtureProbe {
    script: HashMap<&'static str, RangeScript>,
}

impl FixtureProbe {
    pub fn new(script: impl IntoIterator<Item = (&'static str, RangeScript)>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ActiveProbe for FixtureProbe {
    async fn probe(&self, range: &NamedRange, _timeout: Duration) -> Result<ActiveSet, SourceError> {
        match self.script.get(range.name.as_str()) {
            Some(RangeScript::Found(hosts)) => Ok(hosts
                .iter()
                .map(|(ip, mac)| (*ip, mac.map(str::to_string)))
                .collect()),
            Some(RangeScript::Hang) => {
                tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
                Ok(ActiveSet::new())
            }
            Some(RangeScript::Fail) | None => Err(SourceError::ProbeFailed {
                range: range.name.clone(),
                reason: "exit status: 1".to_string(),
            }),
        }
    }
}

/// Resolver answering from a fixed table and recording every question.
#[derive(Default)]
pub struct FixtureResolver {
    names: HashMap<Ipv4Addr, String>,
    asked: Mutex<Vec<Ipv4Addr>>,
}

impl FixtureResolver {
    pub fn new(names: &[(Ipv4Addr, &str)]) -> Self {
        Self {
            names: names.iter().map(|(ip, n)| (*ip, n.to_string())).collect(),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> Vec<Ipv4Addr> {
        let mut asked = self.asked.lock().unwrap().clone();
        asked.sort();
        asked
    }
}

#[async_trait]
impl ReverseResolver for FixtureResolver {
    async fn reverse(&self, ip: Ipv4Addr) -> Result<String, SourceError> {
        self.asked.lock().unwrap().push(ip);
        self.names
            .get(&ip)
            .cloned()
            .ok_or_else(|| SourceError::ResolutionFailed {
                ip,
                reason: "NXDOMAIN".to_string(),
            })
    }
}

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

pub fn ranges() -> Vec<NamedRange> {
    vec![
        NamedRange::new("DHCP", "10.1.1.100-250", false).unwrap(),
        NamedRange::new("LAN", "10.1.20.0/24", true).unwrap(),
        NamedRange::new("WiFi", "10.1.30.0/24", true).unwrap(),
    ]
}

/// Writes the given journal and reservation files into `dir`.
pub fn config_in(dir: &Path, leases: Option<&str>, reservations: &[&str]) -> Config {
    let lease_file = dir.join("dhcpd.leases");
    if let Some(text) = leases {
        std::fs::write(&lease_file, text).unwrap();
    }

    let reservation_files: Vec<PathBuf> = reservations
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let path = dir.join(format!("reservations-{idx}.conf"));
            std::fs::write(&path, text).unwrap();
            path
        })
        .collect();

    Config {
        ranges: ranges(),
        lease_file,
        reservation_files,
        probe_timeout: Duration::from_secs(30),
        dns_timeout: Duration::from_millis(500),
        dns_concurrency: 8,
        no_dns: false,
    }
}

pub const LEASES: &str = r#"
# dhcpd.leases
lease 10.1.1.120 {
  binding state active;
  hardware ethernet 3c:22:fb:10:00:01;
  client-hostname "laptop";
}
lease 10.1.1.121 {
  binding state active;
  uid "\001\"\020\\\253";
  client-hostname "printer";
}
lease 10.1.1.122 {
  binding state active;
  client-hostname "printer";
}
lease 10.1.1.120 {
  binding state active;
  client-hostname "laptop-renamed";
}
"#;

pub const CLIENTS: &str = r#"
host nas {
    hardware ethernet aa:bb:cc:00:00:01;
    fixed-address 10.1.20.10;
}
host tablet {
    hardware ethernet aa:bb:cc:00:00:02;
    fixed-address 10.1.30.44;
}
host outside {
    fixed-address 192.168.50.2;
}
"#;

pub const DEVICES: &str = r#"
host switch-core { hardware ethernet aa:bb:cc:00:00:10; fixed-address 10.1.20.2; }
host printer { hardware ethernet aa:bb:cc:00:00:11; fixed-address 10.1.20.30; }
"#;
