use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub statsd: StatsdSection,
    #[serde(default)]
    pub agent: AgentSection,
}

#[derive(Debug, Deserialize)]
pub struct StatsdSection {
    /// Aggregator hostname or IP. Absence is a valid state: the agent runs
    /// with a no-op transport and a single no-op collector task.
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Default sample rate for every logger call without an explicit rate.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct AgentSection {
    #[serde(default = "default_collection_interval")]
    pub collection_interval_secs: u64,
}

fn default_port() -> u16 {
    8125
}

fn default_sample_rate() -> f64 {
    1.0
}

fn default_collection_interval() -> u64 {
    10
}

impl Default for StatsdSection {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            sample_rate: default_sample_rate(),
        }
    }
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            collection_interval_secs: default_collection_interval(),
        }
    }
}

impl AgentConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the config at the default path, falling back to built-in
    /// defaults (no endpoint configured) when the file does not exist.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let rate = self.statsd.sample_rate;
        if !(0.0..=1.0).contains(&rate) {
            anyhow::bail!("statsd.sample_rate {rate} outside [0.0, 1.0]");
        }
        Ok(())
    }
}
