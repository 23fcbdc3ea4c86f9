use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use moodroom_api::ServerEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info};

use crate::event::{EventSender, SessionEvent};

/// The persistent push connection for one session.
///
/// Inbound frames are parsed as [`ServerEvent`] and forwarded through the
/// session event channel; outbound frames are raw message text. Any
/// connection-level failure emits [`SessionEvent::ChannelClosed`] exactly
/// once and the channel never reconnects — recovery is a fresh login.
pub struct RealtimeChannel {
    outbound: mpsc::UnboundedSender<String>,
    ready: Arc<AtomicBool>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl RealtimeChannel {
    /// Connect and start pumping frames into `events`.
    ///
    /// The credential travels in the URL's `token` query parameter — the
    /// handshake happens before any header of ours could be attached.
    pub async fn connect(ws_url: &str, events: EventSender) -> Result<Self, WsError> {
        let (stream, _response) = connect_async(ws_url).await?;
        info!("realtime channel connected");
        let (mut sink, mut frames) = stream.split();

        let ready = Arc::new(AtomicBool::new(true));
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();

        let writer = tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                // A send failure shows up on the read side too; the reader
                // owns reporting it.
                if sink.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        });

        let reader_ready = ready.clone();
        let reader = tokio::spawn(async move {
            let _ = events.send(SessionEvent::ChannelOpen);
            let reason = loop {
                match frames.next().await {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerEvent>(&text) {
                            Ok(frame) => {
                                if events.send(frame.into()).is_err() {
                                    return;
                                }
                            }
                            Err(err) => debug!(%err, "skipping unparseable frame"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break "connection closed by server".to_string()
                    }
                    Some(Ok(_)) => {} // ping/pong/binary — nothing to dispatch
                    Some(Err(err)) => break err.to_string(),
                }
            };
            reader_ready.store(false, Ordering::SeqCst);
            let _ = events.send(SessionEvent::ChannelClosed(reason));
        });

        Ok(Self {
            outbound,
            ready,
            reader,
            writer,
        })
    }

    /// Send raw message text. Returns whether a frame actually went out.
    ///
    /// Whitespace-only input and a non-ready connection drop the send — no
    /// queueing, no retry — so the caller keeps the input intact.
    pub fn send(&self, text: &str) -> bool {
        if text.trim().is_empty() || !self.ready.load(Ordering::SeqCst) {
            debug!("dropping send: channel not ready or empty input");
            return false;
        }
        self.outbound.send(text.to_string()).is_ok()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Tear the connection down. Safe to call more than once.
    pub fn close(&self) {
        self.ready.store(false, Ordering::SeqCst);
        self.reader.abort();
        self.writer.abort();
    }
}

impl Drop for RealtimeChannel {
    fn drop(&mut self) {
        self.close();
    }
}
