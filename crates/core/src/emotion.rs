//! Emotion label → display glyph mapping.
//!
//! The classifier vocabulary is closed (the 28 GoEmotions labels); anything
//! outside it resolves to the fallback glyph, never an error. Message
//! rendering and the room-mood display share the same lookup.

/// Label the server assigns before classification has run.
pub const UNKNOWN_EMOTION: &str = "unknown";

/// Mood reported when the server has nothing to aggregate.
pub const NEUTRAL_MOOD: &str = "neutral";

/// Glyph for any label outside the known vocabulary.
pub const UNKNOWN_GLYPH: &str = "💬";

/// Every label the classifier can produce.
pub const EMOTION_LABELS: &[&str] = &[
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// Resolve a label to its glyph. Never fails: unrecognized labels get
/// [`UNKNOWN_GLYPH`].
pub fn glyph(label: &str) -> &'static str {
    match label {
        "admiration" => "😍",
        "amusement" => "😄",
        "anger" => "😠",
        "annoyance" => "😒",
        "approval" => "👍",
        "caring" => "🤗",
        "confusion" => "😕",
        "curiosity" => "🤔",
        "desire" => "😏",
        "disappointment" => "😞",
        "disapproval" => "👎",
        "disgust" => "🤢",
        "embarrassment" => "😳",
        "excitement" => "🤩",
        "fear" => "😨",
        "gratitude" => "🙏",
        "grief" => "😥",
        "joy" => "😊",
        "love" => "❤️",
        "nervousness" => "😬",
        "optimism" => "🙂",
        "pride" => "😎",
        "realization" => "💡",
        "relief" => "😌",
        "remorse" => "😔",
        "sadness" => "😢",
        "surprise" => "😮",
        "neutral" => "😐",
        _ => UNKNOWN_GLYPH,
    }
}

/// Glyph for an optional label; absent resolves like an unknown label.
pub fn glyph_opt(label: Option<&str>) -> &'static str {
    label.map(glyph).unwrap_or(UNKNOWN_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::{glyph, glyph_opt, EMOTION_LABELS, UNKNOWN_GLYPH};

    #[test]
    fn every_vocabulary_label_has_a_glyph() {
        for label in EMOTION_LABELS {
            assert!(!glyph(label).is_empty(), "no glyph for {label}");
        }
    }

    #[test]
    fn unknown_labels_resolve_to_the_fallback_glyph() {
        assert_eq!(glyph("definitely-not-an-emotion"), UNKNOWN_GLYPH);
        assert_eq!(glyph(""), UNKNOWN_GLYPH);
        assert_eq!(glyph("unknown"), UNKNOWN_GLYPH);
    }

    #[test]
    fn absent_label_resolves_like_unknown() {
        assert_eq!(glyph_opt(None), UNKNOWN_GLYPH);
        assert_eq!(glyph_opt(Some("joy")), glyph("joy"));
    }

    #[test]
    fn mood_and_message_lookups_share_the_fallback() {
        // The mood header and message bubbles go through the same map, so an
        // out-of-vocabulary mood label lands on the same glyph.
        assert_eq!(glyph("mystery-mood"), glyph_opt(None));
    }
}
