use std::collections::HashMap;

use chrono::{DateTime, Utc};
use moodroom_core::emotion::{self, UNKNOWN_EMOTION};
use moodroom_core::{ChatMessage, MessageId};
use tracing::debug;

/// One rendered group in the conversation, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEntry {
    /// An addressable chat bubble.
    Bubble(MessageBubble),
    /// A `System`-sentinel message: centered text, no id-based lookup.
    Notice(String),
    /// A transient alert line (no id, never mutated).
    Alert(String),
}

/// View-model of a single chat bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBubble {
    pub id: MessageId,
    pub username: String,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub emotion: Option<String>,
    /// `username` matches the logged-in user. Controls alignment, nothing
    /// about the content.
    pub sent: bool,
    /// Arrived over the live channel; drives the entrance accent. History
    /// bubbles never carry this.
    pub live: bool,
}

impl MessageBubble {
    pub fn glyph(&self) -> &'static str {
        emotion::glyph_opt(self.emotion.as_deref())
    }

    /// Hover/detail text for the emotion glyph.
    pub fn tooltip(&self) -> String {
        format!(
            "Detected emotion: {}",
            self.emotion.as_deref().unwrap_or(UNKNOWN_EMOTION)
        )
    }
}

/// The conversation view-model the frontend renders verbatim.
///
/// Every addressable message occupies a slot reachable through an id → slot
/// map populated at append time; enrichment updates go through that map and
/// mutate the bubble in place without re-rendering or reordering anything.
#[derive(Debug, Default)]
pub struct ConversationView {
    username: String,
    entries: Vec<ViewEntry>,
    index: HashMap<MessageId, usize>,
}

impl ConversationView {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole view with fetched history, in server order (oldest
    /// first). History bubbles render without the entrance accent.
    pub fn load_history(&mut self, messages: Vec<ChatMessage>) {
        self.clear();
        for message in messages {
            self.push_message(message, false);
        }
    }

    /// Append a message that arrived live on the channel.
    pub fn append_live(&mut self, message: ChatMessage) {
        self.push_message(message, true);
    }

    pub fn append_alert(&mut self, content: impl Into<String>) {
        self.entries.push(ViewEntry::Alert(content.into()));
    }

    /// Apply a late emotion enrichment in place, keyed by message identity.
    ///
    /// Idempotent upsert: repeats and overwrites are fine. An id with no
    /// rendered bubble is a silent no-op — never queued, never retried.
    /// Returns whether anything changed on screen.
    pub fn apply_emotion(&mut self, message_id: &MessageId, emotion: &str) -> bool {
        let Some(&slot) = self.index.get(message_id) else {
            debug!(%message_id, "emotion update for unrendered message dropped");
            return false;
        };
        match &mut self.entries[slot] {
            ViewEntry::Bubble(bubble) => {
                bubble.emotion = Some(emotion.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn push_message(&mut self, message: ChatMessage, live: bool) {
        // Sentinel messages are notices: centered, not addressable.
        if message.is_system() {
            self.entries.push(ViewEntry::Notice(message.content));
            return;
        }

        let sent = message.username == self.username;
        self.index.insert(message.id.clone(), self.entries.len());
        self.entries.push(ViewEntry::Bubble(MessageBubble {
            id: message.id,
            username: message.username,
            content: message.content,
            timestamp: message.timestamp,
            emotion: message.emotion,
            sent,
            live,
        }));
    }
}
