use crate::Collector;
use anyhow::Result;
use statgram_statsd::Observation;
use std::time::Duration;
use sysinfo::Disks;

pub struct DiskCollector {
    disks: Disks,
    period: Duration,
}

impl DiskCollector {
    pub fn new(period: Duration) -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
            period,
        }
    }
}

/// Statsd lines carry no labels, so the mount point is folded into the
/// metric name: `/` becomes `disk.root.*`, `/var/log` becomes
/// `disk.var_log.*`. Anything non-alphanumeric maps to `_`.
pub(crate) fn mount_key(mount: &str) -> String {
    let trimmed = mount.trim_matches(['/', '\\']);
    if trimmed.is_empty() {
        return "root".to_string();
    }
    trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

impl Collector for DiskCollector {
    fn name(&self) -> &str {
        "disk"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> Result<Vec<Observation>> {
        self.disks.refresh();
        let mut observations = Vec::new();

        for disk in self.disks.iter() {
            let key = mount_key(&disk.mount_point().to_string_lossy());
            let total = disk.total_space();
            let available = disk.available_space();
            let used = total.saturating_sub(available);
            let usage_pct = if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            };

            observations.push(Observation::gauge(format!("disk.{key}.total"), total as f64));
            observations.push(Observation::gauge(
                format!("disk.{key}.available"),
                available as f64,
            ));
            observations.push(Observation::gauge(
                format!("disk.{key}.used_percent"),
                usage_pct,
            ));
        }

        Ok(observations)
    }
}
