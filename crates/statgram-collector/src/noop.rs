use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;

/// Emits nothing. The sole scheduled task when no aggregator endpoint is
/// configured, so the supervisor lifecycle behaves identically with or
/// without telemetry enabled.
pub struct NoopCollector {
    period: Duration,
}

impl NoopCollector {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Collector for NoopCollector {
    fn name(&self) -> &str {
        "noop"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        Ok(Vec::new())
    }
}
