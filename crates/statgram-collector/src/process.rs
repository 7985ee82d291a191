use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};

/// Reports how many schedulable entities the host is carrying.
pub struct ProcessCollector {
    system: System,
    period: Duration,
}

impl ProcessCollector {
    pub fn new(period: Duration) -> Self {
        Self {
            system: System::new(),
            period,
        }
    }
}

impl Collector for ProcessCollector {
    fn name(&self) -> &str {
        "process"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        self.system
            .refresh_processes(ProcessesToUpdate::All, true);
        Ok(vec![Observation::gauge(
            "process.count",
            self.system.processes().len() as f64,
        )])
    }
}
