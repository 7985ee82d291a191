//! Statsd wire-line encoding.
//!
//! One observation becomes one text line:
//!
//! ```text
//! <name>:<value>|<type>[|@<rate>]
//! ```
//!
//! The `|@<rate>` suffix is present only when the effective sample rate for
//! that send is below `1.0`, so the aggregator can statistically re-inflate
//! sampled counts.

/// Wire-level metric kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Timing,
}

impl MetricKind {
    /// Returns the statsd type tag (`c`, `g`, or `ms`).
    pub fn wire_tag(&self) -> &'static str {
        match self {
            MetricKind::Counter => "c",
            MetricKind::Gauge => "g",
            MetricKind::Timing => "ms",
        }
    }
}

/// One named numeric fact about the monitored process, ready to emit.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub name: String,
    pub value: f64,
    pub kind: MetricKind,
}

impl Observation {
    pub fn counter(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            kind: MetricKind::Counter,
        }
    }

    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            kind: MetricKind::Gauge,
        }
    }

    pub fn timing(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            kind: MetricKind::Timing,
        }
    }
}

/// Integral values print without a decimal point so counters read as
/// `jobs.done:3|c` rather than `jobs.done:3.0|c`.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Encodes one observation plus its effective sample rate into a wire line.
///
/// `@` is protocol-reserved as the sample-rate separator; any occurrence in
/// the metric name or stringified value is rewritten to `-` on every line,
/// not only on lines carrying a rate suffix, so downstream parsing is never
/// ambiguous. No other characters are escaped or validated.
pub fn encode_line(name: &str, value: f64, kind: MetricKind, sample_rate: f64) -> String {
    let body = format!("{}:{}|{}", name, format_value(value), kind.wire_tag()).replace('@', "-");
    if sample_rate < 1.0 {
        format!("{body}|@{sample_rate}")
    } else {
        body
    }
}
