//! Resource collectors for the statgram agent.
//!
//! Each [`Collector`] implementation reads one category of runtime resource
//! indicators (memory, CPU, disk, load, process count, uptime) and maps the
//! readings to [`Observation`]s for the statsd pipeline. Collectors are
//! symmetric in contract regardless of what they measure, which lets the
//! supervisor schedule them polymorphically, one task per collector.

pub mod cpu;
pub mod disk;
pub mod load;
pub mod memory;
pub mod noop;
pub mod process;
pub mod uptime;


use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;

/// A periodic resource collector running inside the agent.
///
/// Implementations hold no state between polls beyond the system reading
/// handle. `Send` is required because each collector is moved onto its own
/// scheduled task.
pub trait Collector: Send {
    /// Returns the collector name (e.g., `"memory"`, `"disk"`), used for
    /// task identity and fault reporting.
    fn name(&self) -> &str;

    /// The fixed interval between polls of this collector.
    fn period(&self) -> Duration;

    /// Reads current values from the underlying resource indicator.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying system API call fails.
    fn collect(&mut self) -> Result<Vec<Observation>>;
}
