mod config;
mod supervisor;

#[cfg(test)]
mod tests;

use anyhow::Result;
use config::AgentConfig;
use statgram_collector::cpu::CpuCollector;
use statgram_collector::disk::DiskCollector;
use statgram_collector::load::LoadCollector;
use statgram_collector::memory::MemoryCollector;
use statgram_collector::noop::NoopCollector;
use statgram_collector::process::ProcessCollector;
use statgram_collector::uptime::UptimeCollector;
use statgram_collector::Collector;
use statgram_statsd::{NoopTransport, StatsLogger, Transport, UdpTransport};
use std::sync::Arc;
use std::time::Duration;
use supervisor::Supervisor;
use tokio::signal;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Resolves the task set once at configuration time: the real collectors
/// when an aggregator endpoint is configured, a single no-op task otherwise.
fn build_collectors(config: &AgentConfig) -> Vec<Box<dyn Collector>> {
    let period = Duration::from_secs(config.agent.collection_interval_secs);
    if config.statsd.host.is_none() {
        return vec![Box::new(NoopCollector::new(period))];
    }
    vec![
        Box::new(MemoryCollector::new(period)),
        Box::new(CpuCollector::new(period)),
        Box::new(DiskCollector::new(period)),
        Box::new(LoadCollector::new(period)),
        Box::new(ProcessCollector::new(period)),
        Box::new(UptimeCollector::new(period)),
    ]
}

fn build_transport(config: &AgentConfig) -> Result<Box<dyn Transport>> {
    match config.statsd.host.as_deref() {
        Some(host) => {
            let transport = UdpTransport::new(host, config.statsd.port)?;
            tracing::info!(host, port = config.statsd.port, target = %transport.target(), "statsd endpoint configured");
            Ok(Box::new(transport))
        }
        None => {
            tracing::info!("no statsd endpoint configured, metrics will be discarded");
            Ok(Box::new(NoopTransport))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("statgram=info".parse()?))
        .init();

    // An explicitly given path must load; the default path may be absent.
    let config = match std::env::args().nth(1) {
        Some(path) => AgentConfig::load(&path)?,
        None => AgentConfig::load_or_default("config/agent.toml")?,
    };

    let transport = build_transport(&config)?;
    let logger = Arc::new(StatsLogger::new(transport, config.statsd.sample_rate)?);
    let collectors = build_collectors(&config);

    let (fault_tx, mut fault_rx) = mpsc::unbounded_channel::<supervisor::TaskFault>();
    tokio::spawn(async move {
        while let Some(fault) = fault_rx.recv().await {
            tracing::error!(task = %fault.task, cause = %fault.cause, "collector task failed");
        }
    });

    let mut supervisor = Supervisor::new(logger, collectors, fault_tx);
    supervisor.start();
    tracing::info!(
        tasks = supervisor.task_statuses().len(),
        interval_secs = config.agent.collection_interval_secs,
        sample_rate = config.statsd.sample_rate,
        "statgram-agent running"
    );

    signal::ctrl_c().await?;
    tracing::info!("shutting down");
    supervisor.stop().await;

    Ok(())
}
