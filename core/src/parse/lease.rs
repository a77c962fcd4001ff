//! Lease journal parsing.
//!
//! The journal is append-only and chronological: a lease block appearing later
//! in the text supersedes earlier ones for the same address. dhcpd may be
//! mid-append while we read, so an unfinished last block is skipped instead of
//! rejecting the journal.

use std::net::Ipv4Addr;

use hostmap_common::error::ParseError;
use hostmap_common::network::host::LeaseTable;
use tracing::debug;

use super::lexer::{self, Token};

/// Extracts the most recent hostname claim for every leased IPv4 address.
///
/// Blocks without a `client-hostname`, or with one that is blank, make no
/// claim and leave any earlier claim for the address untouched.
pub fn parse_leases(text: &str) -> Result<LeaseTable, ParseError> {
    let (tokens, truncated) = lexer::tokenize_journal(text)?;
    if let Some(e) = truncated {
        debug!("Skipping unfinished lease entry: {e}");
    }
    let mut leases = LeaseTable::new();

    for block in lexer::blocks(&tokens, "lease") {
        let Token::Word(addr) = block.argument else {
            continue;
        };
        let Ok(ip) = addr.parse::<Ipv4Addr>() else {
            continue;
        };
        let Some(Token::Quoted(hostname)) = block.statement("client-hostname") else {
            continue;
        };

        let hostname = hostname.trim();
        if !hostname.is_empty() {
            leases.insert(ip, hostname.to_string());
        }
    }

    Ok(leases)
}
