//! Kafka publish and drain primitives for the HTTP bridge.
//!
//! This crate wraps `rdkafka` and `tokio` with the two operations the bridge
//! exposes over HTTP: fire-and-forget batch publishing, and draining a topic
//! through an ephemeral per-request consumer session.
//!
//! # Features
//!
//! - Shared `Publisher` with non-blocking enqueue and background delivery reports
//! - Single-use `TopicDrain` sessions that pull until an idle timeout elapses
//! - `drain_session` choreography: commit and close on every exit path
//! - `MessageBroker` / `DrainSession` traits so callers can run without a broker
//! - Environment-driven `BridgeConfig` with bounded idle timeouts
//! - Integrated tracing
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use kafka_bridge::{drain_topic, BridgeConfig, KafkaBroker, MessageBroker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BridgeConfig::new("localhost:9092", "http-bridge");
//!     let broker = KafkaBroker::new(config)?;
//!
//!     broker.publish("orders", Some("order-1"), "{\"total\":42}")?;
//!
//!     let messages = drain_topic(&broker, "orders", Duration::from_millis(5000)).await?;
//!     for message in messages {
//!         println!("{}/{}: {}", message.partition, message.offset, message.message);
//!     }
//!     Ok(())
//! }
//! ```

mod broker;
mod config;
mod consumer;
mod error;
mod message;
mod producer;

pub use broker::{DrainSession, KafkaBroker, MessageBroker};
pub use config::BridgeConfig;
pub use consumer::{drain_session, drain_topic, TopicDrain};
pub use error::{BridgeError, Result};
pub use message::ConsumedMessage;
pub use producer::Publisher;
