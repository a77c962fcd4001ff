//! # Error Taxonomy
//!
//! Every identity source can fail, but none of those failures is allowed to
//! reach the reconciler. The adapters in `hostmap-core` produce these errors,
//! log them and convert them to empty or absent results at their boundary.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of one of the identity sources (files, active probe, reverse DNS).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source {path} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("probe of range '{range}' failed: {reason}")]
    ProbeFailed { range: String, reason: String },

    #[error("probe of range '{range}' timed out after {}s", .timeout.as_secs_f64())]
    ProbeTimedOut { range: String, timeout: Duration },

    #[error("reverse lookup of {ip} failed: {reason}")]
    ResolutionFailed { ip: Ipv4Addr, reason: String },
}

/// Structural failure while tokenizing or parsing dhcpd-style text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated string starting on line {line}")]
    UnterminatedString { line: usize },

    #[error("unbalanced '{brace}' on line {line}")]
    UnbalancedBrace { brace: char, line: usize },
}

/// Rejected range specifier or named range in the configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddr(String),

    #[error("invalid prefix '{0}' (expected 0-32)")]
    InvalidPrefix(String),

    #[error("invalid range end '{0}'")]
    InvalidEnd(String),

    #[error("range starts after it ends: {0}")]
    Reversed(String),

    #[error("expected NAME=RANGE, got '{0}'")]
    MissingName(String),
}
