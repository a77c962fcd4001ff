pub mod list;
pub mod serve;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use hostmap_common::config::Config;
use hostmap_common::error::RangeError;
use hostmap_common::network::range::Ipv4Range;
use hostmap_common::network::scope::NamedRange;
use hostmap_core::inventory::InventoryService;
use hostmap_core::scanner::ActiveProbe;
use hostmap_core::scanner::nmap::NmapProbe;
use hostmap_core::scanner::resolver::{DisabledResolver, ReverseResolver, SystemResolver};

#[derive(Parser)]
#[command(name = "hostmap")]
#[command(about = "A unified inventory of the hosts on a segmented LAN.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Take one inventory snapshot and print it
    #[command(alias = "l")]
    List {
        /// Print the `/api/hosts` JSON body instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Serve the inventory over HTTP
    #[command(alias = "s")]
    Serve {
        #[arg(long, env = "SCAN_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "SCAN_PORT", default_value_t = 5000)]
        port: u16,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// DHCP pool swept for liveness (not a managed subnet)
    #[arg(long, global = true, env = "SCAN_DHCP_RANGE", default_value = "10.1.1.100-250", value_parser = range_spec)]
    pub dhcp_range: String,

    /// Wired LAN, managed subnet tagged `LAN`
    #[arg(long, global = true, env = "SCAN_LAN_RANGE", default_value = "10.1.20.0/24", value_parser = range_spec)]
    pub lan_range: String,

    /// Wireless LAN, managed subnet tagged `WiFi`
    #[arg(long, global = true, env = "SCAN_WIFI_RANGE", default_value = "10.1.30.0/24", value_parser = range_spec)]
    pub wifi_range: String,

    /// Additional managed subnet as NAME=RANGE (repeatable)
    #[arg(long = "range", global = true, value_name = "NAME=RANGE")]
    pub extra_ranges: Vec<NamedRange>,

    /// DHCP lease journal
    #[arg(long, global = true, env = "SCAN_DHCP_LEASES", default_value = "/var/lib/dhcp/dhcpd.leases")]
    pub leases: PathBuf,

    /// Static reservations for clients
    #[arg(long, global = true, env = "SCAN_DHCP_CONF_CLIENT", default_value = "/etc/dhcp/dhcp_clients.conf")]
    pub client_conf: PathBuf,

    /// Static reservations for network devices
    #[arg(long, global = true, env = "SCAN_DHCP_CONF_NETWORK_DEVICE", default_value = "/etc/dhcp/dhcp_network_device.conf")]
    pub device_conf: PathBuf,

    /// Seconds a single range sweep may take
    #[arg(long, global = true, env = "SCAN_PROBE_TIMEOUT", default_value_t = 60)]
    pub probe_timeout: u64,

    /// Milliseconds a single reverse lookup may take
    #[arg(long, global = true, env = "SCAN_DNS_TIMEOUT", default_value_t = 1500)]
    pub dns_timeout: u64,

    /// Reverse lookups allowed in flight at once
    #[arg(long, global = true, env = "SCAN_DNS_CONCURRENCY", default_value_t = 16)]
    pub dns_concurrency: usize,

    /// Never query reverse DNS
    #[arg(long, global = true)]
    pub no_dns: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl ScanArgs {
    pub fn to_config(&self) -> Result<Config, RangeError> {
        let mut ranges = vec![
            NamedRange::new("DHCP", &self.dhcp_range, false)?,
            NamedRange::new("LAN", &self.lan_range, true)?,
            NamedRange::new("WiFi", &self.wifi_range, true)?,
        ];
        ranges.extend(self.extra_ranges.iter().cloned());

        Ok(Config {
            ranges,
            lease_file: self.leases.clone(),
            reservation_files: vec![self.client_conf.clone(), self.device_conf.clone()],
            probe_timeout: Duration::from_secs(self.probe_timeout),
            dns_timeout: Duration::from_millis(self.dns_timeout),
            dns_concurrency: self.dns_concurrency,
            no_dns: self.no_dns,
        })
    }

    /// Builds the production service: `nmap` sweeps and the system resolver.
    pub fn into_service(self) -> Result<InventoryService, RangeError> {
        let config = self.to_config()?;
        let probe: Arc<dyn ActiveProbe> = Arc::new(NmapProbe::default());
        let resolver: Arc<dyn ReverseResolver> = if config.no_dns {
            Arc::new(DisabledResolver)
        } else {
            Arc::new(SystemResolver::new(config.dns_concurrency))
        };
        Ok(InventoryService::new(config, probe, resolver))
    }
}

/// Validates a range specifier but keeps its text for the scan utility.
fn range_spec(s: &str) -> Result<String, RangeError> {
    s.parse::<Ipv4Range>()?;
    Ok(s.trim().to_string())
}
