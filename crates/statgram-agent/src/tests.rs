use crate::build_collectors;
use crate::config::AgentConfig;
use crate::supervisor::{Supervisor, SupervisorState, TaskFault, TaskStatus};
use anyhow::anyhow;
use statgram_collector::Collector;
use statgram_statsd::{Observation, StatsLogger, Transport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

struct RecordingTransport {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Transport for RecordingTransport {
    fn send(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

fn recording_logger() -> (Arc<StatsLogger>, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let transport = RecordingTransport {
        lines: lines.clone(),
    };
    let logger = Arc::new(StatsLogger::new(Box::new(transport), 1.0).unwrap());
    (logger, lines)
}

/// Emits one gauge per poll and counts how often it was polled.
struct TickingCollector {
    name: &'static str,
    period: Duration,
    polls: Arc<AtomicUsize>,
}

impl Collector for TickingCollector {
    fn name(&self) -> &str {
        self.name
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> anyhow::Result<Vec<Observation>> {
        let n = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(vec![Observation::gauge("ticks", n as f64)])
    }
}

/// Fails on every poll cycle.
struct FailingCollector {
    period: Duration,
}

impl Collector for FailingCollector {
    fn name(&self) -> &str {
        "failing"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> anyhow::Result<Vec<Observation>> {
        Err(anyhow!("indicator read refused"))
    }
}

/// Blocks its task long enough to outlive any reasonable stop bound.
struct StuckCollector {
    period: Duration,
}

impl Collector for StuckCollector {
    fn name(&self) -> &str {
        "stuck"
    }

    fn period(&self) -> Duration {
        self.period
    }

    fn collect(&mut self) -> anyhow::Result<Vec<Observation>> {
        std::thread::sleep(Duration::from_secs(2));
        Ok(Vec::new())
    }
}

fn fault_channel() -> (
    mpsc::UnboundedSender<TaskFault>,
    mpsc::UnboundedReceiver<TaskFault>,
) {
    mpsc::unbounded_channel()
}

#[test]
fn config_defaults_cover_everything() {
    let config = AgentConfig::parse("").unwrap();
    assert!(config.statsd.host.is_none());
    assert_eq!(config.statsd.port, 8125);
    assert_eq!(config.statsd.sample_rate, 1.0);
    assert_eq!(config.agent.collection_interval_secs, 10);
}

#[test]
fn config_reads_endpoint_and_rate() {
    let config = AgentConfig::parse(
        r#"
        [statsd]
        host = "metrics.internal"
        port = 9125
        sample_rate = 0.5

        [agent]
        collection_interval_secs = 3
        "#,
    )
    .unwrap();
    assert_eq!(config.statsd.host.as_deref(), Some("metrics.internal"));
    assert_eq!(config.statsd.port, 9125);
    assert_eq!(config.statsd.sample_rate, 0.5);
    assert_eq!(config.agent.collection_interval_secs, 3);
}

#[test]
fn config_rejects_out_of_range_sample_rate() {
    assert!(AgentConfig::parse("[statsd]\nsample_rate = 1.5").is_err());
    assert!(AgentConfig::parse("[statsd]\nsample_rate = -0.1").is_err());
}

#[test]
fn task_set_collapses_to_noop_without_endpoint() {
    let config = AgentConfig::default();
    let collectors = build_collectors(&config);
    assert_eq!(collectors.len(), 1);
    assert_eq!(collectors[0].name(), "noop");

    let config = AgentConfig::parse("[statsd]\nhost = \"127.0.0.1\"").unwrap();
    let names: Vec<_> = build_collectors(&config)
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(
        names,
        ["memory", "cpu", "disk", "load", "process", "uptime"]
    );
}

#[tokio::test(start_paused = true)]
async fn start_is_asynchronous_fanout() {
    let (logger, _) = recording_logger();
    let (tx, _rx) = fault_channel();
    let polls = Arc::new(AtomicUsize::new(0));
    let mut supervisor = Supervisor::new(
        logger,
        vec![Box::new(TickingCollector {
            name: "ticking",
            period: Duration::from_secs(60),
            polls: polls.clone(),
        })],
        tx,
    );

    assert_eq!(supervisor.state(), SupervisorState::Idle);
    supervisor.start();
    // Running means the fan-out was issued, not that any task produced output.
    assert_eq!(supervisor.state(), SupervisorState::Running);
    assert_eq!(
        supervisor.task_statuses().get("ticking"),
        Some(&TaskStatus::Running)
    );

    supervisor.stop().await;
    assert_eq!(supervisor.state(), SupervisorState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn failing_task_is_isolated_from_siblings() {
    let (logger, lines) = recording_logger();
    let (tx, mut rx) = fault_channel();
    let polls = Arc::new(AtomicUsize::new(0));
    let mut supervisor = Supervisor::new(
        logger,
        vec![
            Box::new(FailingCollector {
                period: Duration::from_secs(1),
            }),
            Box::new(TickingCollector {
                name: "ticking",
                period: Duration::from_secs(1),
                polls: polls.clone(),
            }),
        ],
        tx,
    );

    supervisor.start();
    tokio::time::sleep(Duration::from_secs(5)).await;

    // The failing task is Failed with its cause recorded and reported.
    let fault = rx.recv().await.expect("fault event");
    assert_eq!(fault.task, "failing");
    assert!(fault.cause.contains("indicator read refused"));
    match supervisor.task_statuses().get("failing") {
        Some(TaskStatus::Failed(cause)) => assert!(cause.contains("indicator read refused")),
        other => panic!("unexpected status {other:?}"),
    }

    // Siblings keep polling and emitting; the supervisor stays Running.
    assert_eq!(supervisor.state(), SupervisorState::Running);
    assert_eq!(
        supervisor.task_statuses().get("ticking"),
        Some(&TaskStatus::Running)
    );
    assert!(polls.load(Ordering::SeqCst) > 1);
    assert!(!lines.lock().unwrap().is_empty());

    supervisor.stop().await;
    assert_eq!(supervisor.state(), SupervisorState::Stopped);
    assert_eq!(
        supervisor.task_statuses().get("ticking"),
        Some(&TaskStatus::Stopped)
    );
    // A task that already failed keeps its terminal status through stop.
    assert!(matches!(
        supervisor.task_statuses().get("failing"),
        Some(TaskStatus::Failed(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn unconfigured_agent_runs_one_noop_task_and_sends_nothing() {
    let (logger, lines) = recording_logger();
    let (tx, _rx) = fault_channel();
    let mut supervisor = Supervisor::new(logger, build_collectors(&AgentConfig::default()), tx);

    supervisor.start();
    tokio::time::sleep(Duration::from_secs(30)).await;

    let statuses = supervisor.task_statuses();
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses.get("noop"), Some(&TaskStatus::Running));
    assert!(lines.lock().unwrap().is_empty());

    supervisor.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stop_abandons_a_stuck_task_within_the_bound() {
    let (logger, _) = recording_logger();
    let (tx, _rx) = fault_channel();
    let mut supervisor = Supervisor::new(
        logger,
        vec![Box::new(StuckCollector {
            period: Duration::from_millis(10),
        })],
        tx,
    );
    supervisor.set_stop_bound(Duration::from_millis(200));

    supervisor.start();
    // Let the task enter its blocking poll.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let started = std::time::Instant::now();
    supervisor.stop().await;
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(1), "stop took {elapsed:?}");
    assert_eq!(supervisor.state(), SupervisorState::Stopped);
}
