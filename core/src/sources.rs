//! File-backed identity sources.
//!
//! Reading and parsing failures stop here: they are logged and the caller gets
//! an empty table, so a missing journal never takes the inventory down.

use std::path::{Path, PathBuf};

use hostmap_common::error::SourceError;
use hostmap_common::network::host::{LeaseTable, ReservationTable};
use hostmap_common::network::scope::NamedRange;
use tracing::{debug, warn};

use crate::parse;

async fn read_source(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads the lease journal at `path`.
pub async fn read_leases(path: &Path) -> LeaseTable {
    let text = match read_source(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!("{e}");
            return LeaseTable::new();
        }
    };

    match parse::parse_leases(&text) {
        Ok(leases) => {
            debug!("{} lease claims read from {}", leases.len(), path.display());
            leases
        }
        Err(e) => {
            warn!("Ignoring lease journal {}: {e}", path.display());
            LeaseTable::new()
        }
    }
}

/// Reads and merges every reservation file, keeping managed addresses only.
///
/// Files are merged in order; a later file overrides an earlier one for the
/// same address. An unreadable or malformed file contributes nothing.
pub async fn read_reservations(paths: &[PathBuf], ranges: &[NamedRange]) -> ReservationTable {
    let mut merged = ReservationTable::new();

    for path in paths {
        let text = match read_source(path).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        match parse::parse_reservations(&text) {
            Ok(table) => merged.extend(table),
            Err(e) => warn!("Ignoring reservation file {}: {e}", path.display()),
        }
    }

    parse::retain_managed(&mut merged, ranges);
    debug!("{} managed reservations read", merged.len());
    merged
}
