//! Baseline broker configuration.

use std::time::Duration;

/// Immutable baseline configuration shared by every request.
///
/// Publish and drain calls only read from the baseline; per-call consumer
/// settings are derived copies, so one request can never change what the
/// next one sees.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Comma-separated list of Kafka brokers.
    pub brokers: String,

    /// Consumer group ID used by every drain session.
    pub group_id: String,

    /// Where a fresh consumer group starts reading ("earliest" or "latest").
    pub auto_offset_reset: String,

    /// Idle window applied when a drain request carries no timeout.
    pub default_idle_timeout: Duration,

    /// Upper bound on caller-supplied idle windows.
    pub max_idle_timeout: Duration,
}

impl BridgeConfig {
    /// Creates a baseline configuration.
    ///
    /// Defaults: fresh groups read from `earliest`, drains without a caller
    /// timeout wait up to 5 seconds for the first silence, and callers can
    /// request at most a 60 second idle window.
    ///
    /// # Arguments
    ///
    /// * `brokers` - Comma-separated list of Kafka brokers (e.g., "localhost:9092")
    /// * `group_id` - Consumer group ID shared by all drain sessions
    pub fn new(brokers: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            group_id: group_id.into(),
            auto_offset_reset: "earliest".to_string(),
            default_idle_timeout: Duration::from_millis(5_000),
            max_idle_timeout: Duration::from_millis(60_000),
        }
    }

    /// Reads the baseline from the environment, falling back to defaults.
    ///
    /// Recognized variables: `KAFKA_BROKERS`, `KAFKA_GROUP_ID`,
    /// `KAFKA_AUTO_OFFSET_RESET`, `DEFAULT_TIMEOUT_MS`, `MAX_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let brokers =
            std::env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string());
        let group_id =
            std::env::var("KAFKA_GROUP_ID").unwrap_or_else(|_| "kafka-http".to_string());

        let mut config = Self::new(brokers, group_id);
        if let Ok(reset) = std::env::var("KAFKA_AUTO_OFFSET_RESET") {
            config = config.with_auto_offset_reset(reset);
        }
        if let Some(ms) = env_millis("DEFAULT_TIMEOUT_MS") {
            config = config.with_default_idle_timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = env_millis("MAX_TIMEOUT_MS") {
            config = config.with_max_idle_timeout(Duration::from_millis(ms));
        }
        config
    }

    /// Sets where a fresh consumer group starts reading.
    pub fn with_auto_offset_reset(mut self, reset: impl Into<String>) -> Self {
        self.auto_offset_reset = reset.into();
        self
    }

    /// Sets the idle window used when a request carries no timeout.
    pub fn with_default_idle_timeout(mut self, timeout: Duration) -> Self {
        self.default_idle_timeout = timeout;
        self
    }

    /// Sets the upper bound on caller-supplied idle windows.
    pub fn with_max_idle_timeout(mut self, timeout: Duration) -> Self {
        self.max_idle_timeout = timeout;
        self
    }

    /// Derives the effective idle window for one drain call.
    ///
    /// A caller-supplied value is clamped to [`max_idle_timeout`]; an absent
    /// value falls back to [`default_idle_timeout`]. A drain therefore never
    /// waits unbounded, whatever the caller sends.
    ///
    /// [`max_idle_timeout`]: BridgeConfig::max_idle_timeout
    /// [`default_idle_timeout`]: BridgeConfig::default_idle_timeout
    pub fn idle_timeout_for(&self, requested_ms: Option<u64>) -> Duration {
        match requested_ms {
            Some(ms) => Duration::from_millis(ms).min(self.max_idle_timeout),
            None => self.default_idle_timeout,
        }
    }
}

fn env_millis(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_timeout_uses_default() {
        let config = BridgeConfig::new("localhost:9092", "test")
            .with_default_idle_timeout(Duration::from_millis(400));

        assert_eq!(config.idle_timeout_for(None), Duration::from_millis(400));
    }

    #[test]
    fn requested_timeout_is_used_when_below_max() {
        let config = BridgeConfig::new("localhost:9092", "test");

        assert_eq!(
            config.idle_timeout_for(Some(1_500)),
            Duration::from_millis(1_500)
        );
    }

    #[test]
    fn requested_timeout_is_clamped_to_max() {
        let config = BridgeConfig::new("localhost:9092", "test")
            .with_max_idle_timeout(Duration::from_millis(2_000));

        assert_eq!(
            config.idle_timeout_for(Some(600_000)),
            Duration::from_millis(2_000)
        );
    }

    #[test]
    fn builders_override_defaults() {
        let config = BridgeConfig::new("broker:9092", "group")
            .with_auto_offset_reset("latest")
            .with_default_idle_timeout(Duration::from_secs(1))
            .with_max_idle_timeout(Duration::from_secs(10));

        assert_eq!(config.brokers, "broker:9092");
        assert_eq!(config.group_id, "group");
        assert_eq!(config.auto_offset_reset, "latest");
        assert_eq!(config.default_idle_timeout, Duration::from_secs(1));
        assert_eq!(config.max_idle_timeout, Duration::from_secs(10));
    }
}
