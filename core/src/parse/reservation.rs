//! Static reservation parsing (`host <name> { fixed-address <ip>; }`).

use std::net::Ipv4Addr;

use hostmap_common::error::ParseError;
use hostmap_common::network::host::ReservationTable;
use hostmap_common::network::scope::{self, NamedRange};

use super::lexer::{self, Token};

/// Extracts every `host` block carrying an IPv4 `fixed-address`.
///
/// Host blocks may sit at the top level or inside `subnet`/`group` blocks.
/// A later block for the same address replaces an earlier one.
pub fn parse_reservations(text: &str) -> Result<ReservationTable, ParseError> {
    let tokens = lexer::tokenize(text)?;
    let mut reservations = ReservationTable::new();

    for block in lexer::blocks(&tokens, "host") {
        let name = match block.argument {
            Token::Word(name) | Token::Quoted(name) => name.trim(),
            _ => continue,
        };
        if name.is_empty() {
            continue;
        }
        let Some(Token::Word(addr)) = block.statement("fixed-address") else {
            continue;
        };
        // `fixed-address a, b;` lists alternatives; the first one is the reservation.
        let addr = addr.trim_end_matches(',');
        let Ok(ip) = addr.parse::<Ipv4Addr>() else {
            continue;
        };
        reservations.insert(ip, name.to_string());
    }

    Ok(reservations)
}

/// Drops reservations outside every managed range.
pub fn retain_managed(reservations: &mut ReservationTable, ranges: &[NamedRange]) {
    reservations.retain(|ip, _| scope::is_managed(ranges, *ip));
}
