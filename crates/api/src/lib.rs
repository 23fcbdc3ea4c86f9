//! Wire types for the moodroom chat server.
//!
//! This crate is the single source of truth for every HTTP request/response
//! body and every frame on the realtime channel. The server side is external;
//! these types only describe what crosses the wire.

use serde::{Deserialize, Serialize};

pub use moodroom_core::{ChatMessage, MessageId};

// ─── Auth ────────────────────────────────────────────────────────────────────

/// Body of both `POST /login` and `POST /signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Returned on successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Returned by `GET /me` and on successful signup. Signup does not
/// authenticate; the caller still has to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

/// Error body on any non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

// ─── Data ────────────────────────────────────────────────────────────────────

/// `GET /mood` — a point-in-time aggregate; each poll fully replaces the last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodResponse {
    pub mood: String,
}

/// `GET /summary` — generated on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// ─── Realtime channel ────────────────────────────────────────────────────────

/// Inbound frame on the realtime channel, discriminated by `type`.
///
/// Outbound frames are raw message text, never JSON-wrapped, so there is no
/// outbound counterpart here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A new message, live. Join announcements arrive this way too, with the
    /// `System` username and a string id.
    ChatMessage(ChatMessage),
    /// Transient notice addressed to this connection (e.g. moderation
    /// warnings). Display-only; carries no identity.
    SystemAlert { content: String },
    /// Late enrichment for an already-delivered message, keyed by identity.
    EmotionUpdate {
        message_id: MessageId,
        emotion: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_frame_deserializes() {
        let json = r#"{
            "type": "chat_message",
            "id": 17,
            "username": "bob",
            "content": "hi",
            "timestamp": "2024-05-01T12:30:00.123456",
            "emotion": "unknown"
        }"#;

        match serde_json::from_str::<ServerEvent>(json).expect("frame") {
            ServerEvent::ChatMessage(msg) => {
                assert_eq!(msg.id.as_str(), "17");
                assert_eq!(msg.content, "hi");
                assert_eq!(msg.emotion.as_deref(), Some("unknown"));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn system_alert_frame_deserializes() {
        let json = r#"{"type": "system_alert", "content": "You are currently muted."}"#;

        match serde_json::from_str::<ServerEvent>(json).expect("frame") {
            ServerEvent::SystemAlert { content } => {
                assert_eq!(content, "You are currently muted.")
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn emotion_update_accepts_numeric_and_string_ids() {
        let numeric = r#"{"type": "emotion_update", "message_id": 17, "emotion": "gratitude"}"#;
        let text = r#"{"type": "emotion_update", "message_id": "17", "emotion": "gratitude"}"#;

        for json in [numeric, text] {
            match serde_json::from_str::<ServerEvent>(json).expect("frame") {
                ServerEvent::EmotionUpdate {
                    message_id,
                    emotion,
                } => {
                    assert_eq!(message_id.as_str(), "17");
                    assert_eq!(emotion, "gratitude");
                }
                other => panic!("wrong variant: {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_frame_type_is_an_error() {
        let json = r#"{"type": "presence_ping"}"#;
        assert!(serde_json::from_str::<ServerEvent>(json).is_err());
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc"}"#).expect("token");
        assert_eq!(resp.token_type, "bearer");
    }

    #[test]
    fn join_announcement_round_trips() {
        let frame = ServerEvent::ChatMessage(ChatMessage {
            id: MessageId::from("system-2024-05-01T12:30:00"),
            username: moodroom_core::SYSTEM_USERNAME.to_string(),
            content: "bob has joined the chat.".to_string(),
            timestamp: None,
            emotion: Some("neutral".to_string()),
        });

        let encoded = serde_json::to_string(&frame).expect("serialize");
        let decoded: ServerEvent = serde_json::from_str(&encoded).expect("parse");
        match decoded {
            ServerEvent::ChatMessage(msg) => assert!(msg.is_system()),
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
