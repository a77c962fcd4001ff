use std::path::PathBuf;
use std::time::Duration;

use crate::network::scope::NamedRange;

pub struct Config {
    /// Ranges swept by the active probe, in precedence order for MAC merging.
    pub ranges: Vec<NamedRange>,
    pub lease_file: PathBuf,
    /// Reservation files, read and merged in order.
    pub reservation_files: Vec<PathBuf>,
    /// Upper bound for a single range sweep.
    pub probe_timeout: Duration,
    /// Upper bound for a single reverse lookup.
    pub dns_timeout: Duration,
    /// Reverse lookups allowed in flight at once.
    pub dns_concurrency: usize,
    /// Disables reverse DNS entirely.
    ///
    /// Unnamed hosts fall straight through to the synthetic name.
    pub no_dns: bool,
}
