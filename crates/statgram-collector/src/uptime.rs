use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::{Duration, Instant};

/// Reports how long the agent (and therefore its host process) has been up.
pub struct UptimeCollector {
    started: Instant,
    period: Duration,
}

impl UptimeCollector {
    pub fn new(period: Duration) -> Self {
        Self {
            started: Instant::now(),
            period,
        }
    }
}

impl Collector for UptimeCollector {
    fn name(&self) -> &str {
        "uptime"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        Ok(vec![Observation::gauge(
            "uptime.seconds",
            self.started.elapsed().as_secs_f64(),
        )])
    }
}
