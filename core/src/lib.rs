//! # hostmap core
//!
//! Builds a unified, deduplicated inventory of the hosts on a segmented LAN.
//!
//! * **[`parse`]** / **[`sources`]**: the passive sources (lease journal,
//!   static reservations).
//! * **[`scanner`]**: the active sweep and reverse DNS, both behind traits so
//!   tests can swap in fixtures.
//! * **[`reconcile`]**: the pure merge of all sources into [`HostRecord`]s.
//! * **[`inventory`]**: the service tying the above together per request.
//!
//! [`HostRecord`]: hostmap_common::network::host::HostRecord

pub mod inventory;
pub mod parse;
pub mod reconcile;
pub mod scanner;
pub mod sources;
