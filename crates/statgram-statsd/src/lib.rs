//! Statsd emission pipeline: line encoding, statistical sampling, and
//! best-effort UDP transport.
//!
//! The pipeline is assembled once at agent startup: a [`StatsLogger`]
//! combines the line encoder, a per-instance [`Sampler`], and a
//! [`Transport`] (UDP when an aggregator endpoint is configured, no-op
//! otherwise). Collector tasks call the logger concurrently; delivery is
//! fire-and-forget and never perturbs the monitored process.

pub mod error;
pub mod line;
pub mod logger;
pub mod sampler;
pub mod transport;


pub use error::{Result, StatsdError};
pub use line::{encode_line, MetricKind, Observation};
pub use logger::StatsLogger;
pub use sampler::Sampler;
pub use transport::{NoopTransport, Transport, UdpTransport};
