use crate::error::{Result, StatsdError};
use crate::line::{encode_line, MetricKind, Observation};
use crate::sampler::Sampler;
use crate::transport::Transport;

/// The metrics façade combining encoder, sampler, and transport.
///
/// Constructed once at agent startup and shared (`Arc`) across all collector
/// tasks; every operation takes `&self` and is safe for concurrent callers.
/// A suppressed call returns immediately with no side effect; an unsuppressed
/// call encodes the line and issues one fire-and-forget datagram, never
/// blocking on network completion.
pub struct StatsLogger {
    transport: Box<dyn Transport>,
    sampler: Sampler,
    default_rate: f64,
}

impl StatsLogger {
    /// Builds a logger over `transport` with the given default sample rate,
    /// used by every operation that does not pass an explicit rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `default_rate` lies outside `[0.0, 1.0]`.
    pub fn new(transport: Box<dyn Transport>, default_rate: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&default_rate) {
            return Err(StatsdError::InvalidSampleRate(default_rate));
        }
        Ok(Self {
            transport,
            sampler: Sampler::new(),
            default_rate,
        })
    }

    /// Sends a timing in milliseconds at the default sample rate.
    pub fn timing(&self, metric: &str, value_ms: u64) {
        self.timing_with_rate(metric, value_ms, self.default_rate);
    }

    /// Sends a timing in milliseconds at an explicit sample rate.
    pub fn timing_with_rate(&self, metric: &str, value_ms: u64, rate: f64) {
        self.send(metric, value_ms as f64, MetricKind::Timing, rate);
    }

    /// Increments a counter at the default sample rate.
    pub fn increment(&self, metric: &str, amount: i64) {
        self.increment_with_rate(metric, amount, self.default_rate);
    }

    /// Increments a counter at an explicit sample rate.
    pub fn increment_with_rate(&self, metric: &str, amount: i64, rate: f64) {
        self.send(metric, amount as f64, MetricKind::Counter, rate);
    }

    /// Sets a gauge at the default sample rate.
    pub fn gauge(&self, metric: &str, value: f64) {
        self.gauge_with_rate(metric, value, self.default_rate);
    }

    /// Sets a gauge at an explicit sample rate.
    pub fn gauge_with_rate(&self, metric: &str, value: f64, rate: f64) {
        self.send(metric, value, MetricKind::Gauge, rate);
    }

    /// Dispatches one collected observation at the default sample rate.
    pub fn emit(&self, observation: &Observation) {
        self.send(
            &observation.name,
            observation.value,
            observation.kind,
            self.default_rate,
        );
    }

    fn send(&self, metric: &str, value: f64, kind: MetricKind, rate: f64) {
        if !self.sampler.should_send(rate) {
            return;
        }
        let line = encode_line(metric, value, kind, rate);
        self.transport.send(&line);
    }
}
