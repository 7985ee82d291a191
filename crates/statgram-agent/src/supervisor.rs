//! Lifecycle supervisor for the collector task set.
//!
//! One tokio task per collector, each on its own fixed schedule. Tasks never
//! block on one another; a failing task ends alone while its siblings keep
//! emitting. Stop requests a coordinated halt and waits a bounded time,
//! abandoning stragglers so shutdown can never hang the host process.

use statgram_collector::Collector;
use statgram_statsd::StatsLogger;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout};

/// Upper bound on how long [`Supervisor::stop`] waits for tasks to finish.
const STOP_BOUND: Duration = Duration::from_secs(5);

/// Aggregate lifecycle state. `Running` means the start fan-out has been
/// issued, regardless of individual task health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Status of one collector task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Failed(String),
    Stopped,
}

/// One task-failure event, published on the diagnostic channel.
#[derive(Debug, Clone)]
pub struct TaskFault {
    pub task: String,
    pub cause: String,
}

pub struct Supervisor {
    logger: Arc<StatsLogger>,
    collectors: Vec<Box<dyn Collector>>,
    state: SupervisorState,
    statuses: Arc<Mutex<HashMap<String, TaskStatus>>>,
    handles: Vec<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
    faults: mpsc::UnboundedSender<TaskFault>,
    stop_bound: Duration,
}

impl Supervisor {
    /// Builds an idle supervisor over the resolved collector set. Task
    /// failures are published on `faults`; the receiving side decides how to
    /// surface them (the agent drains it into the error log).
    pub fn new(
        logger: Arc<StatsLogger>,
        collectors: Vec<Box<dyn Collector>>,
        faults: mpsc::UnboundedSender<TaskFault>,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            logger,
            collectors,
            state: SupervisorState::Idle,
            statuses: Arc::new(Mutex::new(HashMap::new())),
            handles: Vec::new(),
            shutdown_tx,
            faults,
            stop_bound: STOP_BOUND,
        }
    }

    /// Launches every collector task concurrently and returns without
    /// waiting for any task to complete a cycle. Single start per supervisor
    /// is caller discipline, not checked here.
    pub fn start(&mut self) {
        self.state = SupervisorState::Starting;

        for mut collector in self.collectors.drain(..) {
            let name = collector.name().to_string();
            let period = collector.period();
            let logger = self.logger.clone();
            let statuses = self.statuses.clone();
            let faults = self.faults.clone();
            let mut shutdown = self.shutdown_tx.subscribe();

            set_status(&statuses, &name, TaskStatus::Running);
            tracing::debug!(task = %name, period_secs = period.as_secs_f64(), "starting collector task");

            let handle = tokio::spawn(async move {
                let mut tick = interval(period);
                loop {
                    tokio::select! {
                        _ = tick.tick() => {
                            match collector.collect() {
                                Ok(observations) => {
                                    for obs in &observations {
                                        logger.emit(obs);
                                    }
                                }
                                Err(e) => {
                                    // Failure isolation: this task ends, its
                                    // siblings and the supervisor do not.
                                    let cause = format!("{e:#}");
                                    set_status(&statuses, &name, TaskStatus::Failed(cause.clone()));
                                    let _ = faults.send(TaskFault { task: name, cause });
                                    return;
                                }
                            }
                        }
                        _ = shutdown.changed() => {
                            set_status(&statuses, &name, TaskStatus::Stopped);
                            return;
                        }
                    }
                }
            });
            self.handles.push(handle);
        }

        self.state = SupervisorState::Running;
    }

    /// Requests every task to halt and waits for them to finish, up to a
    /// fixed bound. A slow or stuck task is abandoned rather than awaited
    /// indefinitely; the elapsed bound is degraded shutdown, not an error.
    pub async fn stop(&mut self) {
        self.state = SupervisorState::Stopping;
        let _ = self.shutdown_tx.send(true);

        let bound = self.stop_bound;
        let drain = async {
            for handle in self.handles.drain(..) {
                let _ = handle.await;
            }
        };
        if timeout(bound, drain).await.is_err() {
            tracing::warn!(
                bound_secs = bound.as_secs_f64(),
                "some collector tasks did not stop within the bound, abandoning them"
            );
        }

        self.state = SupervisorState::Stopped;
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Snapshot of per-task statuses, keyed by collector name.
    pub fn task_statuses(&self) -> HashMap<String, TaskStatus> {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn set_stop_bound(&mut self, bound: Duration) {
        self.stop_bound = bound;
    }
}

fn set_status(statuses: &Mutex<HashMap<String, TaskStatus>>, name: &str, status: TaskStatus) {
    statuses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.to_string(), status);
}
