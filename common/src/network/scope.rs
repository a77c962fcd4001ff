//! # Named Ranges
//!
//! The inventory is configured with a list of named ranges. Every range is
//! swept by the active probe; ranges flagged as *managed* are also the subnets
//! whose static reservations are trusted and whose name becomes the `source`
//! tag of the hosts inside them.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::RangeError;
use crate::network::range::Ipv4Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    pub name: String,
    /// The specifier exactly as configured, handed verbatim to the scan utility.
    pub spec: String,
    pub range: Ipv4Range,
    pub managed: bool,
}

impl NamedRange {
    pub fn new(name: impl Into<String>, spec: &str, managed: bool) -> Result<Self, RangeError> {
        let range = spec.parse::<Ipv4Range>()?;
        Ok(Self {
            name: name.into(),
            spec: spec.trim().to_string(),
            range,
            managed,
        })
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.range.contains(ip)
    }
}

impl fmt::Display for NamedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.spec)
    }
}

impl FromStr for NamedRange {
    type Err = RangeError;

    /// Parses `NAME=SPEC` into a managed range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, spec)) = s.split_once('=') else {
            return Err(RangeError::MissingName(s.to_string()));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(RangeError::MissingName(s.to_string()));
        }
        NamedRange::new(name, spec, true)
    }
}

/// Finds the first managed range containing `ip`, in configuration order.
pub fn managed_range_of(ranges: &[NamedRange], ip: Ipv4Addr) -> Option<&NamedRange> {
    ranges.iter().filter(|r| r.managed).find(|r| r.contains(ip))
}

pub fn is_managed(ranges: &[NamedRange], ip: Ipv4Addr) -> bool {
    managed_range_of(ranges, ip).is_some()
}
