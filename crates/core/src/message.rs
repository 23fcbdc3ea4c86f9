use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reserved username on server-generated announcements (joins, leaves).
/// Messages from this sender render as centered notices, not chat bubbles.
pub const SYSTEM_USERNAME: &str = "System";

/// Stable identity of an addressable chat message.
///
/// Persisted rows carry numeric ids while synthetic announcements carry
/// string ids (`system-<timestamp>`), so the wire form is either a JSON
/// number or a string. Both normalize to the same string key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for MessageId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(i64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Num(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}

/// A single conversation entry, as delivered by the history endpoint or a
/// `chat_message` frame on the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub username: String,
    pub content: String,
    /// Server-stamped creation time. The server emits naive ISO-8601
    /// (no offset, assumed UTC); unparseable or absent values become `None`.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    /// Classifier label. Absent until the asynchronous enrichment lands;
    /// rendering falls back to the unknown glyph in the meantime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

impl ChatMessage {
    pub fn is_system(&self) -> bool {
        self.username == SYSTEM_USERNAME
    }
}

/// Parse RFC 3339, or naive ISO-8601 assumed UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    raw.parse::<chrono::NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, ChatMessage, MessageId, SYSTEM_USERNAME};

    #[test]
    fn message_id_accepts_numbers_and_strings() {
        let numeric: MessageId = serde_json::from_str("42").expect("numeric id");
        let text: MessageId = serde_json::from_str("\"system-2024\"").expect("string id");

        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text.as_str(), "system-2024");
        assert_eq!(numeric, MessageId::from(42));
    }

    #[test]
    fn message_id_serializes_as_string() {
        let id = MessageId::from(7);
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"7\"");
    }

    #[test]
    fn chat_message_parses_history_row_with_extra_fields() {
        let json = r#"{
            "id": 3,
            "user_id": 12,
            "username": "bob",
            "content": "hi there",
            "timestamp": "2024-05-01T12:30:00.123456",
            "emotion": null
        }"#;

        let msg: ChatMessage = serde_json::from_str(json).expect("history row");
        assert_eq!(msg.id.as_str(), "3");
        assert_eq!(msg.username, "bob");
        assert!(msg.timestamp.is_some());
        assert!(msg.emotion.is_none());
        assert!(!msg.is_system());
    }

    #[test]
    fn chat_message_tolerates_missing_timestamp() {
        let json = r#"{"id": "m1", "username": "alice", "content": "hello"}"#;
        let msg: ChatMessage = serde_json::from_str(json).expect("minimal message");
        assert!(msg.timestamp.is_none());
    }

    #[test]
    fn system_messages_use_reserved_sentinel() {
        let json = format!(
            r#"{{"id": "system-x", "username": "{SYSTEM_USERNAME}", "content": "bob has joined the chat.", "emotion": "neutral"}}"#
        );
        let msg: ChatMessage = serde_json::from_str(&json).expect("announcement");
        assert!(msg.is_system());
    }

    #[test]
    fn parse_timestamp_accepts_naive_and_rfc3339() {
        assert!(parse_timestamp("2024-05-01T12:30:00").is_some());
        assert!(parse_timestamp("2024-05-01T12:30:00.123456").is_some());
        assert!(parse_timestamp("2024-05-01T12:30:00Z").is_some());
        assert!(parse_timestamp("2024-05-01T12:30:00+09:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn unparseable_timestamp_becomes_none() {
        let json = r#"{"id": 1, "username": "bob", "content": "x", "timestamp": "yesterday"}"#;
        let msg: ChatMessage = serde_json::from_str(json).expect("message");
        assert!(msg.timestamp.is_none());
    }
}
