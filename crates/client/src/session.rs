use std::sync::Arc;
use std::time::Duration;

use moodroom_api::UserResponse;
use moodroom_api_client::{ApiClient, ApiError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::channel::RealtimeChannel;
use crate::event::{EventSender, SessionEvent};
use crate::poller;
use crate::store::SessionStore;

/// HTTP timeout for every call the session makes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One logged-in chat session: the identity, the realtime channel, the mood
/// poller, and the in-flight history fetch, owned together so teardown can
/// take all of them down at once.
///
/// Constructed fresh per login and discarded on logout; the owner must not
/// start a second session while one is active.
pub struct ChatSession {
    client: Arc<ApiClient>,
    identity: UserResponse,
    channel: Option<RealtimeChannel>,
    poller: JoinHandle<()>,
    history: JoinHandle<()>,
    stopped: bool,
}

impl ChatSession {
    /// The entry sequencer. Runs once per become-active transition.
    ///
    /// Step 1 is the identity gate: if `GET /me` fails for any reason the
    /// credential is treated as invalid, the store is cleared, and the error
    /// is returned — the caller stays on the auth view. The remaining steps
    /// (history fetch, mood poller, channel connect) are fired with no
    /// completion-order guarantee and each owns its own failure handling:
    /// history failure and poll-tick failures are non-fatal, while a channel
    /// failure surfaces as [`SessionEvent::ChannelClosed`] for the caller to
    /// tear down on.
    pub async fn start(
        base_url: &str,
        store: &mut SessionStore,
        mood_poll_interval: Duration,
        events: EventSender,
    ) -> Result<Self, ApiError> {
        let token = store.get().ok_or(ApiError::MissingToken)?.to_string();
        let mut client = ApiClient::new(base_url, REQUEST_TIMEOUT)?;
        client.set_auth(token);
        let client = Arc::new(client);

        let identity = match client.me().await {
            Ok(user) => user,
            Err(err) => {
                // Session-fatal: the credential is no good. Clear it so the
                // caller lands back on the auth view logged out.
                warn!(%err, "identity fetch failed, invalidating session");
                store.clear();
                return Err(err);
            }
        };
        info!(username = %identity.username, "entering chat");

        let history = spawn_history_fetch(client.clone(), events.clone());
        let poller = poller::spawn(client.clone(), mood_poll_interval, events.clone());

        let channel = match client.ws_url() {
            Ok(url) => match RealtimeChannel::connect(&url, events.clone()).await {
                Ok(channel) => Some(channel),
                Err(err) => {
                    error!(%err, "realtime channel connect failed");
                    let _ = events.send(SessionEvent::ChannelClosed(err.to_string()));
                    None
                }
            },
            Err(err) => {
                error!(%err, "cannot derive realtime endpoint");
                let _ = events.send(SessionEvent::ChannelClosed(err.to_string()));
                None
            }
        };

        Ok(Self {
            client,
            identity,
            channel,
            poller,
            history,
            stopped: false,
        })
    }

    pub fn username(&self) -> &str {
        &self.identity.username
    }

    /// Authenticated client for on-demand calls (summary) while the session
    /// is active.
    pub fn client(&self) -> Arc<ApiClient> {
        self.client.clone()
    }

    pub fn channel_ready(&self) -> bool {
        !self.stopped && self.channel.as_ref().is_some_and(RealtimeChannel::is_ready)
    }

    /// Send raw message text over the channel. Returns whether a frame
    /// actually went out; on `false` the caller keeps the input as-is.
    pub fn send(&self, text: &str) -> bool {
        if self.stopped {
            return false;
        }
        self.channel
            .as_ref()
            .map(|channel| channel.send(text))
            .unwrap_or(false)
    }

    /// The single teardown point: close the channel, stop the poller and any
    /// in-flight history fetch, clear the credential — together and
    /// unconditionally. Idempotent: a second call is a no-op, so a session
    /// torn down for a channel error can be torn down again on logout
    /// without touching a newer login's credential.
    pub fn stop(&mut self, store: &mut SessionStore) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        info!(username = %self.identity.username, "tearing down session");

        if let Some(channel) = &self.channel {
            channel.close();
        }
        self.poller.abort();
        self.history.abort();
        store.clear();
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        // Credential clearing is the owner's job via stop(); dropping only
        // reaps the background tasks.
        if let Some(channel) = &self.channel {
            channel.close();
        }
        self.poller.abort();
        self.history.abort();
    }
}

fn spawn_history_fetch(client: Arc<ApiClient>, events: EventSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        match client.messages().await {
            Ok(messages) => {
                let _ = events.send(SessionEvent::HistoryLoaded(messages));
            }
            Err(err) => {
                // Non-fatal and not retried; the view stays empty.
                warn!(%err, "history fetch failed");
                let _ = events.send(SessionEvent::HistoryFailed(err.detail()));
            }
        }
    })
}
