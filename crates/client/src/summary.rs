/// Shown by the summary view when the slot is empty — direct navigation, or
/// re-entry after the one-shot read already consumed the text.
pub const EMPTY_SUMMARY_PLACEHOLDER: &str =
    "No summary available. Please go back to the chat and generate one.";

/// Write-once/read-once transfer slot for handing a fetched summary to the
/// summary view at switch time.
///
/// Consumption contract: `put` overwrites any stale value; `take` yields the
/// text at most once and leaves the slot empty. The destination view calls
/// `take` on entry and falls back to [`EMPTY_SUMMARY_PLACEHOLDER`].
#[derive(Debug, Default)]
pub struct SummarySlot {
    text: Option<String>,
}

impl SummarySlot {
    pub fn put(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn take(&mut self) -> Option<String> {
        self.text.take()
    }
}
