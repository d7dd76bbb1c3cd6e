//! HTTP handlers for the publish and drain endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
};
use axum_extra::extract::Form;
use kafka_bridge::{drain_topic, BridgeConfig, ConsumedMessage, MessageBroker};
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<dyn MessageBroker>,
    pub config: BridgeConfig,
}

/// Form body for `POST /message`.
///
/// `key` and `message` repeat. Every field defaults to empty so a missing
/// one reaches validation instead of being rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct PublishForm {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub key: Vec<String>,
    #[serde(default)]
    pub message: Vec<String>,
}

impl PublishForm {
    /// Collects every violated rule, in order. An empty list means the
    /// batch may be published.
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.topic.is_empty() {
            errors.push("Undefined topic".to_string());
        }
        if self.message.is_empty() {
            errors.push("Undefined message".to_string());
        }
        if !self.key.is_empty() && self.key.len() != self.message.len() {
            errors.push("Messages count != keys count".to_string());
        }
        errors
    }
}

/// Query parameters for `GET /message`.
#[derive(Debug, Deserialize)]
pub struct ConsumeParams {
    pub topic: Option<String>,
    /// Idle timeout override in milliseconds, clamped to the configured cap.
    pub timeout: Option<u64>,
}

/// Publish a batch of records to one topic.
///
/// Records are enqueued in index order, pairing `key[i]` with `message[i]`
/// when keys were supplied. A 200 means every record was accepted into the
/// producer queue, not that the broker acknowledged delivery.
pub async fn publish_messages(
    State(state): State<AppState>,
    Form(form): Form<PublishForm>,
) -> Result<()> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    for (i, payload) in form.message.iter().enumerate() {
        let key = form.key.get(i).map(String::as_str);
        state.broker.publish(&form.topic, key, payload)?;
    }

    info!(
        topic = %form.topic,
        count = form.message.len(),
        "Batch accepted for publishing"
    );
    Ok(())
}

/// Drain one topic through a throwaway session.
///
/// Pulls until the topic stays idle for the effective timeout, commits the
/// session's progress, and returns everything read. An empty array is a
/// normal outcome for a quiet topic.
pub async fn read_messages(
    State(state): State<AppState>,
    Query(params): Query<ConsumeParams>,
) -> Result<Json<Vec<ConsumedMessage>>> {
    let topic = match params.topic.as_deref() {
        Some(topic) if !topic.is_empty() => topic,
        _ => return Err(ApiError::Validation(vec!["Undefined topic".to_string()])),
    };

    let idle_timeout = state.config.idle_timeout_for(params.timeout);
    let messages = drain_topic(state.broker.as_ref(), topic, idle_timeout).await?;

    info!(
        topic = %topic,
        count = messages.len(),
        timeout_ms = idle_timeout.as_millis() as u64,
        "Drained topic"
    );
    Ok(Json(messages))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(topic: &str, keys: &[&str], messages: &[&str]) -> PublishForm {
        PublishForm {
            topic: topic.to_string(),
            key: keys.iter().map(|s| s.to_string()).collect(),
            message: messages.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_batch_passes() {
        assert!(form("orders", &["k1"], &["v1"]).validate().is_empty());
    }

    #[test]
    fn test_keys_are_optional() {
        assert!(form("orders", &[], &["v1", "v2"]).validate().is_empty());
    }

    #[test]
    fn test_missing_topic_reported() {
        let errors = form("", &[], &["v1"]).validate();
        assert_eq!(errors, vec!["Undefined topic"]);
    }

    #[test]
    fn test_missing_messages_reported() {
        let errors = form("orders", &[], &[]).validate();
        assert_eq!(errors, vec!["Undefined message"]);
    }

    #[test]
    fn test_count_mismatch_reported() {
        let errors = form("orders", &["k1"], &["v1", "v2"]).validate();
        assert_eq!(errors, vec!["Messages count != keys count"]);
    }

    #[test]
    fn test_errors_accumulate() {
        let errors = form("", &["k1"], &[]).validate();
        assert_eq!(
            errors,
            vec![
                "Undefined topic",
                "Undefined message",
                "Messages count != keys count"
            ]
        );
    }
}
