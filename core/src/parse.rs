//! Parsers for the passive identity sources.
//!
//! Both sources share the ISC dhcpd grammar, so they sit on one tokenizer.
//! A structural error anywhere in a text rejects the whole text; the callers in
//! [`crate::sources`] turn that into an empty table.

pub mod lease;
pub mod lexer;
pub mod reservation;

pub use lease::parse_leases;
pub use reservation::{parse_reservations, retain_managed};
