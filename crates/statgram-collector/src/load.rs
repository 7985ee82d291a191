use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;
use sysinfo::System;

pub struct LoadCollector {
    period: Duration,
}

impl LoadCollector {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Collector for LoadCollector {
    fn name(&self) -> &str {
        "load"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        let load_avg = System::load_average();

        Ok(vec![
            Observation::gauge("system.load_1", load_avg.one),
            Observation::gauge("system.load_5", load_avg.five),
            Observation::gauge("system.load_15", load_avg.fifteen),
        ])
    }
}
