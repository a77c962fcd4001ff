//! # IPv4 Range Model
//!
//! A continuous, inclusive range of IPv4 addresses and the parser for the
//! range specifiers accepted in the configuration:
//! * A single address (`10.1.1.7`).
//! * A full range (`10.1.1.1-10.1.1.50`).
//! * An abbreviated range (`10.1.1.100-250`, `10.1.1.1-2.66`).
//! * A CIDR block (`10.1.20.0/24`).

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;

use crate::error::RangeError;

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        let ip = u32::from(ip);
        u32::from(self.start_addr) <= ip && ip <= u32::from(self.end_addr)
    }

    pub fn len(&self) -> u64 {
        let start = u64::from(u32::from(self.start_addr));
        let end = u64::from(u32::from(self.end_addr));
        (end + 1).saturating_sub(start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_addr == self.end_addr {
            write!(f, "{}", self.start_addr)
        } else {
            write!(f, "{}-{}", self.start_addr, self.end_addr)
        }
    }
}

impl FromStr for Ipv4Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((ip_str, prefix_str)) = s.split_once('/') {
            return parse_cidr_range(ip_str, prefix_str);
        }

        if let Some((start_str, end_str)) = s.split_once('-') {
            let start_addr = parse_addr(start_str)?;
            let end_addr = parse_range_end_addr(end_str, &start_addr)?;
            if u32::from(start_addr) > u32::from(end_addr) {
                return Err(RangeError::Reversed(s.to_string()));
            }
            return Ok(Ipv4Range::new(start_addr, end_addr));
        }

        let addr = parse_addr(s)?;
        Ok(Ipv4Range::new(addr, addr))
    }
}

/// Creates a range from an IP and a CIDR prefix (e.g., 10.1.20.0/24).
///
/// Returns the range covering the entire network block, host bits ignored.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, RangeError> {
    let network = Ipv4Network::new(ip, prefix)
        .map_err(|_| RangeError::InvalidPrefix(prefix.to_string()))?;

    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

fn parse_addr(s: &str) -> Result<Ipv4Addr, RangeError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| RangeError::InvalidAddr(s.to_string()))
}

fn parse_cidr_range(ip_str: &str, prefix_str: &str) -> Result<Ipv4Range, RangeError> {
    let ip = parse_addr(ip_str)?;
    let prefix = prefix_str
        .trim()
        .parse::<u8>()
        .map_err(|_| RangeError::InvalidPrefix(prefix_str.to_string()))?;
    cidr_range(ip, prefix)
}

/// Parses the end of a range.
///
/// Handles abbreviated forms like "10.1.1.100-250" (implies 10.1.1.250)
/// and full forms like "10.1.1.100-10.1.1.250".
fn parse_range_end_addr(end_str: &str, start_addr: &Ipv4Addr) -> Result<Ipv4Addr, RangeError> {
    let end_str = end_str.trim();
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| RangeError::InvalidEnd(end_str.to_string()))?;

    if partial_octets.is_empty() || partial_octets.len() > 4 {
        return Err(RangeError::InvalidEnd(end_str.to_string()));
    }

    let mut end_octets = start_addr.octets();
    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_end_addr_helper() {
        let start = Ipv4Addr::new(10, 1, 1, 100);

        assert_eq!(
            parse_range_end_addr("10.1.1.250", &start),
            Ok(Ipv4Addr::new(10, 1, 1, 250))
        );
        assert_eq!(
            parse_range_end_addr("250", &start),
            Ok(Ipv4Addr::new(10, 1, 1, 250))
        );
        assert_eq!(
            parse_range_end_addr("2.66", &start),
            Ok(Ipv4Addr::new(10, 1, 2, 66))
        );

        // --- Error Cases ---
        assert!(parse_range_end_addr("2.256", &start).is_err());
        assert!(parse_range_end_addr("1.2.3.4.5", &start).is_err());
        assert!(parse_range_end_addr("", &start).is_err());
    }

    #[test]
    fn test_from_str_abbreviated_range() {
        let range: Ipv4Range = "10.1.1.100-250".parse().unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(10, 1, 1, 100));
        assert_eq!(range.end_addr, Ipv4Addr::new(10, 1, 1, 250));
        assert_eq!(range.len(), 151);
    }

    #[test]
    fn test_from_str_cidr() {
        let range: Ipv4Range = "10.1.20.77/24".parse().unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(10, 1, 20, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(10, 1, 20, 255));
        assert!(range.contains(Ipv4Addr::new(10, 1, 20, 10)));
        assert!(!range.contains(Ipv4Addr::new(10, 1, 21, 0)));
    }

    #[test]
    fn test_from_str_single_host() {
        let range: Ipv4Range = "10.1.1.7".parse().unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.to_string(), "10.1.1.7");
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("not-an-ip".parse::<Ipv4Range>().is_err());
        assert!("10.0.0.1/33".parse::<Ipv4Range>().is_err());
        assert!("10.0.0.256-1.1.1.1".parse::<Ipv4Range>().is_err());
        assert_eq!(
            "10.0.0.9-1".parse::<Ipv4Range>(),
            Err(RangeError::Reversed("10.0.0.9-1".to_string()))
        );
    }

    #[test]
    fn test_cidr_zero_prefix_covers_everything() {
        let range = cidr_range(Ipv4Addr::new(10, 0, 0, 0), 0).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::UNSPECIFIED);
        assert_eq!(range.end_addr, Ipv4Addr::BROADCAST);
    }

    #[test]
    fn test_cidr_range_bounds() {
        let host = cidr_range(Ipv4Addr::new(10, 1, 20, 9), 32).unwrap();
        assert_eq!(host, Ipv4Range::new(Ipv4Addr::new(10, 1, 20, 9), Ipv4Addr::new(10, 1, 20, 9)));

        let block = cidr_range(Ipv4Addr::new(10, 1, 30, 200), 25).unwrap();
        assert_eq!(block.start_addr, Ipv4Addr::new(10, 1, 30, 128));
        assert_eq!(block.end_addr, Ipv4Addr::new(10, 1, 30, 255));

        assert_eq!(
            cidr_range(Ipv4Addr::new(10, 1, 20, 0), 33),
            Err(RangeError::InvalidPrefix("33".to_string()))
        );
    }
}
