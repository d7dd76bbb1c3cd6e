//! Broker capability contract and its rdkafka implementation.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::BridgeConfig;
use crate::consumer::TopicDrain;
use crate::error::Result;
use crate::message::ConsumedMessage;
use crate::producer::Publisher;

/// The publish and drain capabilities the HTTP layer programs against.
///
/// The production implementation is [`KafkaBroker`]; tests substitute an
/// in-memory one, so endpoint logic never needs a running broker.
pub trait MessageBroker: Send + Sync {
    /// Enqueues one record for `topic`.
    ///
    /// Delivery is fire-and-forget: a successful return means the record was
    /// accepted locally, not that the broker acknowledged it.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be enqueued.
    fn publish(&self, topic: &str, key: Option<&str>, payload: &str) -> Result<()>;

    /// Opens a single-use drain session subscribed to exactly one topic.
    ///
    /// `idle_timeout` is how long a pull waits with no data before the
    /// session signals exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened.
    fn open_session(&self, topic: &str, idle_timeout: Duration) -> Result<Box<dyn DrainSession>>;
}

/// An ephemeral, single-topic consumption session.
///
/// A session is exclusively owned by one drain call. Dropping it releases
/// all broker-side resources; there is no separate close call to forget.
#[async_trait]
pub trait DrainSession: Send {
    /// Pulls the next available record.
    ///
    /// Returns `Ok(None)` once the idle window elapses with no record. The
    /// idle signal is control flow, not an error.
    async fn next_message(&mut self) -> Result<Option<ConsumedMessage>>;

    /// Durably records this session's consumption progress.
    async fn commit(&mut self) -> Result<()>;
}

/// rdkafka-backed broker client: one shared producer for the process plus a
/// throwaway consumer per drain session.
pub struct KafkaBroker {
    publisher: Publisher,
    config: BridgeConfig,
}

impl KafkaBroker {
    /// Connects the shared producer. Drain sessions are opened lazily, one
    /// per request.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer cannot be created.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let publisher = Publisher::new(&config)?;
        Ok(Self { publisher, config })
    }

    /// The baseline configuration sessions are derived from.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Flushes records still queued in the shared producer.
    ///
    /// Call this once at process shutdown so accepted records are not lost
    /// with the queue.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    pub fn shutdown(&self, timeout: Duration) -> Result<()> {
        self.publisher.flush(timeout)
    }
}

impl MessageBroker for KafkaBroker {
    fn publish(&self, topic: &str, key: Option<&str>, payload: &str) -> Result<()> {
        self.publisher.send(topic, key, payload)
    }

    fn open_session(&self, topic: &str, idle_timeout: Duration) -> Result<Box<dyn DrainSession>> {
        Ok(Box::new(TopicDrain::open(&self.config, topic, idle_timeout)?))
    }
}
