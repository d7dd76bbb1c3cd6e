//! Wire representation of one consumed record.

use rdkafka::message::BorrowedMessage;
use rdkafka::Message;
use serde::{Deserialize, Serialize};

/// One record read from a topic, shaped for the HTTP response.
///
/// Partition and offset are assigned by the broker. A record without a key
/// serializes without a `key` field at all, never as `null` or an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumedMessage {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub message: String,
    pub partition: i32,
    pub offset: i64,
}

impl ConsumedMessage {
    /// Builds the wire shape from raw record parts.
    ///
    /// Key and payload bytes are decoded as UTF-8, replacing invalid
    /// sequences. A record with no payload yields an empty message.
    pub fn from_parts(
        topic: &str,
        key: Option<&[u8]>,
        payload: Option<&[u8]>,
        partition: i32,
        offset: i64,
    ) -> Self {
        Self {
            topic: topic.to_string(),
            key: key.map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
            message: payload
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default(),
            partition,
            offset,
        }
    }

    /// Shapes one rdkafka message.
    pub fn from_kafka(message: &BorrowedMessage<'_>) -> Self {
        Self::from_parts(
            message.topic(),
            message.key(),
            message.payload(),
            message.partition(),
            message.offset(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_omitted_from_json() {
        let message = ConsumedMessage::from_parts("events", None, Some(b"payload"), 0, 42);

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("key").is_none());
        assert_eq!(json["topic"], "events");
        assert_eq!(json["message"], "payload");
        assert_eq!(json["partition"], 0);
        assert_eq!(json["offset"], 42);
    }

    #[test]
    fn present_key_is_serialized() {
        let message = ConsumedMessage::from_parts("events", Some(b"k1"), Some(b"v1"), 3, 7);

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["key"], "k1");
        assert_eq!(json["message"], "v1");
        assert_eq!(json["partition"], 3);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let message = ConsumedMessage::from_parts("events", Some(&[0xff, 0xfe]), Some(b"ok"), 0, 0);

        assert_eq!(message.key.as_deref(), Some("\u{fffd}\u{fffd}"));
        assert_eq!(message.message, "ok");
    }

    #[test]
    fn missing_payload_becomes_empty_message() {
        let message = ConsumedMessage::from_parts("events", None, None, 1, 9);

        assert_eq!(message.message, "");
    }
}
