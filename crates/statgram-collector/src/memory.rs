use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;
use sysinfo::System;

pub struct MemoryCollector {
    system: System,
    period: Duration,
}

impl MemoryCollector {
    pub fn new(period: Duration) -> Self {
        Self {
            system: System::new(),
            period,
        }
    }
}

impl Collector for MemoryCollector {
    fn name(&self) -> &str {
        "memory"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let used = self.system.used_memory();
        let available = self.system.available_memory();
        let usage_pct = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Ok(vec![
            Observation::gauge("memory.total", total as f64),
            Observation::gauge("memory.used", used as f64),
            Observation::gauge("memory.available", available as f64),
            Observation::gauge("memory.used_percent", usage_pct),
            Observation::gauge("memory.swap_used", self.system.used_swap() as f64),
        ])
    }
}
