//! Ping sweep through the external `nmap` utility.
//!
//! `nmap -sn` performs host discovery only (ARP on the local segment, ICMP and
//! TCP pings beyond it) and prints a short report per responding host.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use hostmap_common::error::SourceError;
use hostmap_common::network::host::ActiveSet;
use hostmap_common::network::scope::NamedRange;
use tokio::process::Command;
use tracing::debug;

use super::ActiveProbe;

const REPORT_MARKER: &str = "Nmap scan report for";
const MAC_MARKER: &str = "MAC Address:";

pub struct NmapProbe {
    program: String,
}

impl Default for NmapProbe {
    fn default() -> Self {
        Self::new("nmap")
    }
}

impl NmapProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ActiveProbe for NmapProbe {
    async fn probe(&self, range: &NamedRange, timeout: Duration) -> Result<ActiveSet, SourceError> {
        let failed = |reason: String| SourceError::ProbeFailed {
            range: range.name.clone(),
            reason,
        };

        debug!("Sweeping {range} with {}", self.program);

        let child = Command::new(&self.program)
            .args(["-sn", "-T4", "--max-retries", "2", range.spec.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(format!("cannot start {}: {e}", self.program)))?;

        // Dropping the pending future on timeout kills the child.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(|e| failed(e.to_string()))?,
            Err(_) => {
                return Err(SourceError::ProbeTimedOut {
                    range: range.name.clone(),
                    timeout,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!("{} ({})", output.status, stderr.trim())));
        }

        Ok(parse_scan_report(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extracts responding hosts from a textual scan report.
///
/// A report line opens a host; a MAC line that follows attaches its address to
/// that host. Lines in any other shape are ignored.
pub fn parse_scan_report(report: &str) -> ActiveSet {
    let mut found = ActiveSet::new();
    let mut current: Option<Ipv4Addr> = None;

    for line in report.lines() {
        if line.contains(REPORT_MARKER) {
            current = line
                .split_whitespace()
                .last()
                .map(|token| token.trim_start_matches('(').trim_end_matches(')'))
                .and_then(|token| token.parse::<Ipv4Addr>().ok());
            if let Some(ip) = current {
                found.insert(ip, None);
            }
        } else if let Some((_, rest)) = line.split_once(MAC_MARKER) {
            let mac = rest.split_whitespace().next();
            if let (Some(ip), Some(mac)) = (current, mac) {
                found.insert(ip, Some(mac.to_string()));
            }
        }
    }

    found
}
