use std::sync::Arc;
use std::time::Duration;

use moodroom_api_client::ApiClient;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::event::{EventSender, SessionEvent};

/// Spawn the recurring mood poll: one fetch immediately, then one per
/// interval until the returned handle is aborted.
///
/// Ticks are independent: a failed fetch is logged and skipped, the interval
/// keeps running, and each success fully replaces the displayed mood.
pub fn spawn(
    client: Arc<ApiClient>,
    interval: Duration,
    events: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            // The first tick completes immediately.
            ticker.tick().await;
            match client.mood().await {
                Ok(resp) => {
                    if events.send(SessionEvent::MoodUpdated(resp.mood)).is_err() {
                        break;
                    }
                }
                Err(err) => warn!(%err, "mood poll tick skipped"),
            }
        }
    })
}
