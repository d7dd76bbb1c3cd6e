//! Per-request topic draining.
//!
//! Each drain call owns a throwaway consumer: subscribe to one topic, pull
//! records until the idle window elapses, commit progress, close. Treating a
//! bounded silence as exhaustion is what turns Kafka's unbounded pull stream
//! into a finite HTTP response.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::consumer::{CommitMode, Consumer as RdConsumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::types::RDKafkaErrorCode;
use rdkafka::ClientConfig;
use tracing::{debug, warn};

use crate::broker::{DrainSession, MessageBroker};
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::message::ConsumedMessage;

/// Single-use consumer bound to one topic for the lifetime of one request.
///
/// Dropping the drain closes the underlying consumer, so broker-side
/// resources are released on every exit path, including cancellation of the
/// request future.
pub struct TopicDrain {
    consumer: StreamConsumer,
    idle_timeout: Duration,
}

impl TopicDrain {
    /// Opens a consumer for `topic` with settings derived from the baseline.
    ///
    /// The session joins the baseline's consumer group and commits offsets
    /// explicitly at the end of the drain, never automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer cannot be created or the
    /// subscription fails.
    pub fn open(config: &BridgeConfig, topic: &str, idle_timeout: Duration) -> Result<Self> {
        debug!(
            "Opening drain for topic '{}' (group: {}, idle timeout: {:?})",
            topic, config.group_id, idle_timeout
        );

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", &config.auto_offset_reset)
            .set("session.timeout.ms", "6000")
            .set("enable.partition.eof", "false")
            .create()?;

        consumer.subscribe(&[topic])?;

        Ok(Self {
            consumer,
            idle_timeout,
        })
    }
}

#[async_trait]
impl DrainSession for TopicDrain {
    async fn next_message(&mut self) -> Result<Option<ConsumedMessage>> {
        match tokio::time::timeout(self.idle_timeout, self.consumer.recv()).await {
            Ok(Ok(message)) => Ok(Some(ConsumedMessage::from_kafka(&message))),
            Ok(Err(e)) => Err(e.into()),
            // No record arrived within the idle window: the source is
            // exhausted for this request.
            Err(_) => Ok(None),
        }
    }

    async fn commit(&mut self) -> Result<()> {
        match self.consumer.commit_consumer_state(CommitMode::Sync) {
            // Nothing was consumed, so there is no position to record.
            Err(KafkaError::ConsumerCommit(RDKafkaErrorCode::NoOffset)) => Ok(()),
            Err(e) => Err(e.into()),
            Ok(()) => Ok(()),
        }
    }
}

/// Pulls every record the session yields until it signals idle exhaustion,
/// then commits its progress and closes it.
///
/// Commit-then-close runs on every exit path: a backend failure mid-loop
/// still commits the progress made and drops the session before the error
/// propagates. If the calling future is dropped instead, the session closes
/// without committing.
pub async fn drain_session(mut session: Box<dyn DrainSession>) -> Result<Vec<ConsumedMessage>> {
    let mut messages = Vec::new();

    let failure = loop {
        match session.next_message().await {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => break None,
            Err(e) => break Some(e),
        }
    };

    let committed = session.commit().await;
    drop(session);

    if let Some(e) = failure {
        if let Err(commit_error) = committed {
            warn!("Commit after failed drain also failed: {}", commit_error);
        }
        return Err(e);
    }
    committed?;

    debug!("Drained {} messages", messages.len());
    Ok(messages)
}

/// Opens a session for `topic` and drains it until the idle window elapses.
///
/// # Errors
///
/// Returns an error if the session cannot be opened, a pull fails, or the
/// final commit fails. The session is committed (where possible) and closed
/// in all of these cases.
pub async fn drain_topic(
    broker: &dyn MessageBroker,
    topic: &str,
    idle_timeout: Duration,
) -> Result<Vec<ConsumedMessage>> {
    let session = broker.open_session(topic, idle_timeout)?;
    drain_session(session).await
}
