//! Client-side synchronization core.
//!
//! Reconciles three independently-arriving sources — the one-shot history
//! fetch, the realtime push channel, and the periodic mood poll — into a
//! single consistent conversation view, and owns the session lifecycle
//! around them (entry sequencing, idempotent teardown).

pub mod channel;
pub mod event;
pub mod poller;
pub mod session;
pub mod store;
pub mod summary;
pub mod view;

pub use event::{EventSender, SessionEvent};
pub use session::ChatSession;
pub use store::SessionStore;
pub use summary::SummarySlot;
pub use view::{ConversationView, MessageBubble, ViewEntry};
