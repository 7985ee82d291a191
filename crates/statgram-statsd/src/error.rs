/// Errors that can occur while constructing the statsd pipeline.
///
/// Only construction is fallible. Per-send transport failures are swallowed
/// inside [`crate::Transport`] implementations: once the pipeline is built,
/// delivery is best-effort and no steady-state error reaches the caller.
///
/// # Examples
///
/// ```rust
/// use statgram_statsd::StatsdError;
///
/// let err = StatsdError::InvalidSampleRate(1.5);
/// assert!(err.to_string().contains("1.5"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StatsdError {
    /// The aggregator endpoint did not resolve to a socket address.
    #[error("statsd: cannot resolve endpoint '{endpoint}': {source}")]
    Resolve {
        endpoint: String,
        source: std::io::Error,
    },

    /// Resolution succeeded but yielded no usable address.
    #[error("statsd: endpoint '{endpoint}' resolved to no addresses")]
    NoAddress { endpoint: String },

    /// The local send socket could not be opened.
    #[error("statsd: cannot open send socket: {0}")]
    Bind(#[source] std::io::Error),

    /// A sample rate outside `[0.0, 1.0]` was supplied at construction.
    #[error("statsd: sample rate {0} outside [0.0, 1.0]")]
    InvalidSampleRate(f64),
}

/// Convenience `Result` alias for pipeline construction.
pub type Result<T> = std::result::Result<T, StatsdError>;
