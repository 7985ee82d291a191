use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;
use sysinfo::System;

pub struct CpuCollector {
    system: System,
    period: Duration,
}

impl CpuCollector {
    pub fn new(period: Duration) -> Self {
        // First refresh primes the usage baseline; the first poll then has a
        // real delta to report.
        let mut system = System::new();
        system.refresh_cpu_all();
        Self { system, period }
    }
}

impl Collector for CpuCollector {
    fn name(&self) -> &str {
        "cpu"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        self.system.refresh_cpu_all();
        Ok(vec![Observation::gauge(
            "cpu.usage",
            self.system.global_cpu_usage() as f64,
        )])
    }
}
