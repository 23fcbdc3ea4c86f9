use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use moodroom_client::summary::EMPTY_SUMMARY_PLACEHOLDER;
use moodroom_client::{ChatSession, ConversationView, SessionEvent, SessionStore, SummarySlot};
use moodroom_core::config::ClientConfig;
use moodroom_core::emotion::NEUTRAL_MOOD;
use tracing::warn;

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::scroll::FollowTailState;

/// How long a live message keeps its entrance accent.
const ENTRANCE_ACCENT: Duration = Duration::from_millis(1200);

/// Rows jumped by PageUp/PageDown in the message list.
const SCROLL_PAGE: u16 = 10;

/// Which screen the user is viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    Chat,
    Summary,
}

/// Auth form submission mode. Toggling relabels the form and clears any
/// displayed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
        }
    }

    pub fn toggle_hint(self) -> &'static str {
        match self {
            Self::Login => "Sign up for an account",
            Self::Signup => "Login to your account",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }
}

/// Focused input on the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Username,
    Password,
}

impl AuthField {
    pub fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }
}

pub struct App {
    pub view: View,
    pub should_quit: bool,
    pub config: ClientConfig,

    // ── Auth form ────────────────────────────────────────────────────
    pub auth_mode: AuthMode,
    pub auth_field: AuthField,
    pub username_input: String,
    pub password_input: String,
    pub auth_error: Option<String>,
    pub auth_notice: Option<String>,
    pub auth_pending: bool,

    // ── Session ──────────────────────────────────────────────────────
    pub store: SessionStore,
    pub session: Option<ChatSession>,
    pub events: Option<Receiver<SessionEvent>>,
    pub conversation: ConversationView,
    pub mood: String,
    pub channel_open: bool,
    live_arrivals: HashMap<String, Instant>,

    // ── Chat input & scroll ──────────────────────────────────────────
    pub message_input: String,
    pub scroll: FollowTailState,

    // ── Summary handoff ──────────────────────────────────────────────
    pub summary_slot: SummarySlot,
    pub summary_pending: bool,
    pub summary_error: Option<String>,
    pub summary_text: Option<String>,

    pub pending_command: Option<AsyncCommand>,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            view: View::Auth,
            should_quit: false,
            config,
            auth_mode: AuthMode::Login,
            auth_field: AuthField::Username,
            username_input: String::new(),
            password_input: String::new(),
            auth_error: None,
            auth_notice: None,
            auth_pending: false,
            store: SessionStore::default(),
            session: None,
            events: None,
            conversation: ConversationView::default(),
            mood: NEUTRAL_MOOD.to_string(),
            channel_open: false,
            live_arrivals: HashMap::new(),
            message_input: String::new(),
            scroll: FollowTailState::default(),
            summary_slot: SummarySlot::default(),
            summary_pending: false,
            summary_error: None,
            summary_text: None,
            pending_command: None,
        }
    }

    // ── Key handling ─────────────────────────────────────────────────

    /// Dispatch one key press. Lifecycle work that needs the runtime
    /// (chat entry) is signalled through `pending_command`/`apply_result`.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.view {
            View::Auth => self.handle_auth_key(key),
            View::Chat => self.handle_chat_key(key),
            View::Summary => self.handle_summary_key(key),
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('t') {
                self.toggle_auth_mode();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.auth_field = self.auth_field.next();
            }
            KeyCode::Enter => self.submit_auth(),
            KeyCode::Backspace => {
                self.active_auth_field_mut().pop();
            }
            KeyCode::Char(c) => {
                self.active_auth_field_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.request_summary(),
                KeyCode::Char('l') => self.teardown(None),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.teardown(None),
            KeyCode::Enter => self.send_current_message(),
            KeyCode::Up => self.scroll.line_up(),
            KeyCode::Down => self.scroll.line_down(),
            KeyCode::PageUp => self.scroll.page_up(SCROLL_PAGE),
            KeyCode::PageDown => self.scroll.page_down(SCROLL_PAGE),
            KeyCode::End => self.scroll.reattach(),
            KeyCode::Backspace => {
                self.message_input.pop();
            }
            KeyCode::Char(c) => self.message_input.push(c),
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => {
                self.summary_text = None;
                self.view = View::Chat;
            }
            _ => {}
        }
    }

    fn active_auth_field_mut(&mut self) -> &mut String {
        match self.auth_field {
            AuthField::Username => &mut self.username_input,
            AuthField::Password => &mut self.password_input,
        }
    }

    // ── Auth flow ────────────────────────────────────────────────────

    /// Switch between login and signup. Clears the inline error; the form
    /// relabels from the mode.
    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = self.auth_mode.toggled();
        self.auth_error = None;
        self.auth_notice = None;
    }

    fn submit_auth(&mut self) {
        if self.auth_pending {
            return;
        }
        self.auth_error = None;
        self.auth_notice = None;
        self.auth_pending = true;

        let username = self.username_input.clone();
        let password = self.password_input.clone();
        self.pending_command = Some(match self.auth_mode {
            AuthMode::Login => AsyncCommand::Login { username, password },
            AuthMode::Signup => AsyncCommand::Signup { username, password },
        });
    }

    /// Fold a finished command back into the app. Returns `true` when a
    /// login succeeded and the caller should run the chat entry sequencer.
    pub fn apply_result(&mut self, result: CommandResult) -> bool {
        match result {
            CommandResult::Login(Ok(token)) => {
                self.auth_pending = false;
                self.password_input.clear();
                self.store.set(token);
                true
            }
            CommandResult::Login(Err(detail)) => {
                self.auth_pending = false;
                self.auth_error = Some(detail);
                false
            }
            CommandResult::Signup(Ok(_)) => {
                // Signup never authenticates; push the user back to login.
                self.auth_pending = false;
                self.auth_mode = AuthMode::Login;
                self.auth_notice = Some("Signup successful! Please log in.".to_string());
                false
            }
            CommandResult::Signup(Err(detail)) => {
                self.auth_pending = false;
                self.auth_error = Some(detail);
                false
            }
            CommandResult::Summary(Ok(text)) => {
                self.summary_pending = false;
                self.summary_slot.put(text);
                self.open_summary();
                false
            }
            CommandResult::Summary(Err(detail)) => {
                // Restore the control; stay on the chat view.
                self.summary_pending = false;
                self.summary_error = Some(detail);
                false
            }
        }
    }

    // ── Chat ─────────────────────────────────────────────────────────

    /// Send the input over the channel. The input is cleared only when a
    /// frame actually went out; a not-ready channel or blank input leaves
    /// it untouched.
    pub fn send_current_message(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        if session.send(&self.message_input) {
            self.message_input.clear();
            self.scroll.reattach();
        }
    }

    fn request_summary(&mut self) {
        if self.summary_pending || self.session.is_none() {
            return;
        }
        self.summary_pending = true;
        self.summary_error = None;
        self.pending_command = Some(AsyncCommand::FetchSummary);
    }

    /// Enter the summary view, consuming the slot (at-most-once read). An
    /// empty slot shows the placeholder instead.
    pub fn open_summary(&mut self) {
        let text = self
            .summary_slot
            .take()
            .unwrap_or_else(|| EMPTY_SUMMARY_PLACEHOLDER.to_string());
        self.summary_text = Some(text);
        self.view = View::Summary;
    }

    /// True when `id` still deserves the entrance accent.
    pub fn entrance_accent(&self, id: &str) -> bool {
        self.live_arrivals
            .get(id)
            .is_some_and(|at| at.elapsed() < ENTRANCE_ACCENT)
    }

    // ── Session events ───────────────────────────────────────────────

    /// Drain everything the background tasks produced since the last frame.
    /// A channel failure observed here runs the full teardown.
    pub fn drain_session_events(&mut self) {
        let Some(events) = self.events.take() else {
            return;
        };

        let mut fatal = None;
        while let Ok(event) = events.try_recv() {
            match event {
                SessionEvent::HistoryLoaded(messages) => {
                    self.conversation.load_history(messages);
                    self.scroll.reattach();
                }
                SessionEvent::HistoryFailed(detail) => {
                    // Non-fatal: the view stays empty, nothing is retried.
                    warn!(%detail, "history fetch failed");
                }
                SessionEvent::MoodUpdated(mood) => self.mood = mood,
                SessionEvent::ChannelOpen => self.channel_open = true,
                SessionEvent::MessageReceived(message) => {
                    self.live_arrivals
                        .insert(message.id.to_string(), Instant::now());
                    self.conversation.append_live(message);
                    self.scroll.reattach();
                }
                SessionEvent::AlertReceived(content) => {
                    self.conversation.append_alert(content);
                    self.scroll.reattach();
                }
                SessionEvent::EmotionUpdated {
                    message_id,
                    emotion,
                } => {
                    self.conversation.apply_emotion(&message_id, &emotion);
                }
                SessionEvent::ChannelClosed(reason) => {
                    fatal = Some(reason);
                    break;
                }
            }
        }

        if let Some(reason) = fatal {
            self.teardown(Some(format!(
                "Connection error: {reason}. Please log in again."
            )));
        } else {
            self.events = Some(events);
            self.prune_live_arrivals();
        }
    }

    fn prune_live_arrivals(&mut self) {
        self.live_arrivals
            .retain(|_, at| at.elapsed() < ENTRANCE_ACCENT);
    }

    // ── Teardown ─────────────────────────────────────────────────────

    /// The single logout path: stop the session (channel, poller, history),
    /// clear the credential, reset the chat state, return to the auth view.
    /// Idempotent — safe to call when already logged out.
    pub fn teardown(&mut self, notice: Option<String>) {
        if let Some(mut session) = self.session.take() {
            session.stop(&mut self.store);
        } else {
            self.store.clear();
        }
        self.events = None;
        self.conversation.clear();
        self.live_arrivals.clear();
        self.channel_open = false;
        self.mood = NEUTRAL_MOOD.to_string();
        self.message_input.clear();
        self.scroll.reset();
        self.summary_pending = false;
        self.summary_error = None;
        self.summary_text = None;
        self.auth_pending = false;
        self.auth_error = None;
        self.auth_notice = notice;
        self.view = View::Auth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodroom_core::{ChatMessage, MessageId};
    use std::sync::mpsc;

    fn app() -> App {
        App::new(ClientConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn toggling_auth_mode_clears_the_error_and_relabels() {
        let mut app = app();
        app.auth_error = Some("Incorrect username or password".to_string());

        app.handle_key(ctrl('t'));
        assert_eq!(app.auth_mode, AuthMode::Signup);
        assert_eq!(app.auth_mode.title(), "Sign Up");
        assert!(app.auth_error.is_none());

        app.handle_key(ctrl('t'));
        assert_eq!(app.auth_mode, AuthMode::Login);
    }

    #[test]
    fn login_failure_shows_the_detail_inline() {
        let mut app = app();
        app.auth_pending = true;

        let needs_entry =
            app.apply_result(CommandResult::Login(Err("Incorrect password".to_string())));

        assert!(!needs_entry);
        assert!(!app.auth_pending);
        assert_eq!(app.auth_error.as_deref(), Some("Incorrect password"));
        assert_eq!(app.view, View::Auth);
    }

    #[test]
    fn login_success_stores_the_credential_and_requests_entry() {
        let mut app = app();
        let needs_entry = app.apply_result(CommandResult::Login(Ok("tok".to_string())));

        assert!(needs_entry);
        assert_eq!(app.store.get(), Some("tok"));
    }

    #[test]
    fn signup_success_forces_login_mode_without_a_session() {
        let mut app = app();
        app.auth_mode = AuthMode::Signup;

        app.apply_result(CommandResult::Signup(Ok("alice".to_string())));

        assert_eq!(app.auth_mode, AuthMode::Login);
        assert!(app.auth_notice.is_some());
        assert!(!app.store.is_logged_in());
    }

    #[test]
    fn dropped_send_keeps_the_input() {
        let mut app = app();
        app.view = View::Chat;
        app.message_input = "still here".to_string();

        // No session, so nothing can go out.
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.message_input, "still here");
    }

    #[test]
    fn summary_failure_restores_the_control() {
        let mut app = app();
        app.view = View::Chat;
        app.summary_pending = true;

        app.apply_result(CommandResult::Summary(Err("upstream down".to_string())));

        assert!(!app.summary_pending);
        assert_eq!(app.summary_error.as_deref(), Some("upstream down"));
        assert_eq!(app.view, View::Chat);
    }

    #[test]
    fn summary_view_reads_the_slot_at_most_once() {
        let mut app = app();
        app.apply_result(CommandResult::Summary(Ok("the gist".to_string())));

        assert_eq!(app.view, View::Summary);
        assert_eq!(app.summary_text.as_deref(), Some("the gist"));

        // Leaving and re-opening finds the slot already consumed.
        app.handle_key(key(KeyCode::Esc));
        app.open_summary();
        assert_eq!(
            app.summary_text.as_deref(),
            Some(EMPTY_SUMMARY_PLACEHOLDER)
        );
    }

    #[test]
    fn teardown_is_idempotent_and_lands_on_auth() {
        let mut app = app();
        app.store.set("tok");
        app.view = View::Chat;
        app.message_input = "draft".to_string();

        app.teardown(None);
        app.teardown(None);

        assert_eq!(app.view, View::Auth);
        assert!(!app.store.is_logged_in());
        assert!(app.message_input.is_empty());
        assert!(app.session.is_none());
    }

    #[test]
    fn channel_failure_drains_into_a_full_teardown() {
        let mut app = app();
        app.view = View::Chat;
        app.store.set("tok");
        let (tx, rx) = mpsc::channel();
        app.events = Some(rx);

        tx.send(SessionEvent::ChannelClosed("boom".to_string()))
            .expect("send");
        app.drain_session_events();

        assert_eq!(app.view, View::Auth);
        assert!(!app.store.is_logged_in());
        assert!(app.events.is_none());
        assert!(app.auth_notice.as_deref().is_some_and(|n| n.contains("boom")));
    }

    #[test]
    fn drained_events_update_conversation_and_mood() {
        let mut app = app();
        app.view = View::Chat;
        let (tx, rx) = mpsc::channel();
        app.events = Some(rx);

        tx.send(SessionEvent::MessageReceived(ChatMessage {
            id: MessageId::from(1),
            username: "bob".to_string(),
            content: "hi".to_string(),
            timestamp: None,
            emotion: None,
        }))
        .expect("send");
        tx.send(SessionEvent::MoodUpdated("joy".to_string()))
            .expect("send");
        app.drain_session_events();

        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.mood, "joy");
        assert!(app.entrance_accent("1"));
    }
}
