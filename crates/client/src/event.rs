use moodroom_api::ServerEvent;
use moodroom_core::{ChatMessage, MessageId};

/// Sender half of the channel every background task reports through. The
/// frontend drains the receiving end once per frame.
pub type EventSender = std::sync::mpsc::Sender<SessionEvent>;

/// Everything the synchronization core can tell the frontend.
///
/// All sources (history fetch, poller, realtime channel) funnel through this
/// one union; ordering between sources is not guaranteed and consumers must
/// not assume any.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// History fetch completed; messages are oldest-first as served.
    HistoryLoaded(Vec<ChatMessage>),
    /// History fetch failed. Non-fatal; the view stays empty.
    HistoryFailed(String),
    /// A mood poll tick succeeded; the label fully replaces the prior one.
    MoodUpdated(String),
    /// The realtime channel finished its handshake.
    ChannelOpen,
    /// A live message arrived on the channel.
    MessageReceived(ChatMessage),
    /// A transient alert addressed to this connection.
    AlertReceived(String),
    /// Late enrichment for an already-delivered message.
    EmotionUpdated {
        message_id: MessageId,
        emotion: String,
    },
    /// The channel errored or closed. Session-fatal: the consumer must run
    /// the teardown path. Emitted at most once per connection.
    ChannelClosed(String),
}

/// Single dispatch point for inbound frames. Adding a frame kind to
/// [`ServerEvent`] extends this match and nothing else.
impl From<ServerEvent> for SessionEvent {
    fn from(event: ServerEvent) -> Self {
        match event {
            ServerEvent::ChatMessage(message) => Self::MessageReceived(message),
            ServerEvent::SystemAlert { content } => Self::AlertReceived(content),
            ServerEvent::EmotionUpdate {
                message_id,
                emotion,
            } => Self::EmotionUpdated {
                message_id,
                emotion,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionEvent;
    use moodroom_api::ServerEvent;

    #[test]
    fn inbound_frames_dispatch_to_session_events() {
        let frames = [
            r#"{"type": "chat_message", "id": 1, "username": "bob", "content": "hi"}"#,
            r#"{"type": "system_alert", "content": "warning"}"#,
            r#"{"type": "emotion_update", "message_id": 1, "emotion": "joy"}"#,
        ];

        let events: Vec<SessionEvent> = frames
            .iter()
            .map(|raw| serde_json::from_str::<ServerEvent>(raw).expect("frame").into())
            .collect();

        assert!(matches!(events[0], SessionEvent::MessageReceived(_)));
        assert!(matches!(events[1], SessionEvent::AlertReceived(_)));
        assert!(matches!(events[2], SessionEvent::EmotionUpdated { .. }));
    }
}
