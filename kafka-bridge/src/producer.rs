//! Shared Kafka producer for the publish endpoint.

use std::time::Duration;

use rdkafka::producer::{FutureProducer, FutureRecord, Producer as RdProducer};
use rdkafka::ClientConfig;
use tracing::{debug, error, info};

use crate::config::BridgeConfig;
use crate::error::Result;

/// Long-lived producer shared by every publish request.
///
/// [`send`] enqueues a record and returns without waiting for broker
/// acknowledgment; delivery reports are awaited off-request and failures
/// logged, so publishing through this type is at-most-once best-effort.
/// The underlying `FutureProducer` is safe for concurrent sends from many
/// in-flight requests.
///
/// [`send`]: Publisher::send
pub struct Publisher {
    inner: FutureProducer,
}

impl Publisher {
    /// Creates the producer from the baseline configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer cannot be created.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        info!("Creating Kafka producer with brokers: {}", config.brokers);

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .set("queue.buffering.max.messages", "100000")
            .create()?;

        Ok(Self { inner: producer })
    }

    /// Creates a producer from a custom rdkafka configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer cannot be created.
    pub fn from_client_config(config: ClientConfig) -> Result<Self> {
        let producer: FutureProducer = config.create()?;
        Ok(Self { inner: producer })
    }

    /// Enqueues one record without waiting for delivery.
    ///
    /// Key and payload travel as raw UTF-8 bytes. The delivery report is
    /// awaited in a background task and logged either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be enqueued (for example, the
    /// local queue is full). Delivery failures after a successful enqueue do
    /// not surface here.
    pub fn send(&self, topic: &str, key: Option<&str>, payload: &str) -> Result<()> {
        debug!(
            "Enqueueing message for topic '{}' ({} bytes)",
            topic,
            payload.len()
        );

        let record = FutureRecord {
            topic,
            partition: None,
            payload: Some(payload.as_bytes()),
            key: key.map(str::as_bytes),
            timestamp: None,
            headers: None,
        };

        match self.inner.send_result(record) {
            Ok(delivery) => {
                let topic = topic.to_string();
                tokio::spawn(async move {
                    match delivery.await {
                        Ok(Ok((partition, offset))) => debug!(
                            "Message delivered to topic '{}' (partition: {}, offset: {})",
                            topic, partition, offset
                        ),
                        Ok(Err((e, _))) => {
                            error!("Delivery to topic '{}' failed: {}", topic, e)
                        }
                        Err(_) => error!(
                            "Delivery report for topic '{}' was dropped before completion",
                            topic
                        ),
                    }
                });
                Ok(())
            }
            Err((e, _)) => {
                error!("Failed to enqueue message for topic '{}': {}", topic, e);
                Err(e.into())
            }
        }
    }

    /// Flushes any pending messages.
    ///
    /// This ensures queued records reach the broker before the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        RdProducer::flush(&self.inner, timeout)?;
        Ok(())
    }
}
