mod app;
mod async_ops;
pub mod config;
mod scroll;
mod theme;
mod ui;
mod views;

use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use moodroom_client::{ChatSession, ConversationView};
use moodroom_core::config::ClientConfig;
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use app::{App, View};

/// Credential handed to this process by the environment — the equivalent of
/// a reload finding the tab's session still present. Never persisted.
const TOKEN_ENV: &str = "MOODROOM_TOKEN";

/// Launch the TUI with the given configuration.
pub fn run(config: ClientConfig) -> Result<()> {
    let rt = Runtime::new()?;
    let mut app = App::new(config);

    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            app.store.set(token);
        }
    }

    // Terminal setup
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Credential presence at load enters chat directly; a failed identity
    // check inside falls back to the auth view.
    if app.store.is_logged_in() {
        enter_chat(&mut app, &rt);
    }

    let result = run_loop(&mut terminal, &mut app, &rt);

    // Nothing may keep running once the UI is gone.
    app.teardown(None);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    rt: &Runtime,
) -> Result<()> {
    loop {
        app.drain_session_events();
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(cmd) = app.pending_command.take() {
            let session_client = app.session.as_ref().map(ChatSession::client);
            let result = rt.block_on(async_ops::execute(cmd, &app.config, session_client));
            if app.apply_result(result) {
                enter_chat(app, rt);
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// The become-active transition. Idempotent: a second entry while a session
/// is active is refused, so no duplicate channel or poller can exist.
fn enter_chat(app: &mut App, rt: &Runtime) {
    if app.session.is_some() {
        return;
    }

    let (events_tx, events_rx) = mpsc::channel();
    let started = rt.block_on(ChatSession::start(
        &app.config.server.url,
        &mut app.store,
        app.config.chat.mood_poll_interval(),
        events_tx,
    ));

    match started {
        Ok(session) => {
            app.conversation = ConversationView::new(session.username());
            app.session = Some(session);
            app.events = Some(events_rx);
            app.scroll.reset();
            app.auth_error = None;
            app.auth_notice = None;
            app.view = View::Chat;
        }
        Err(err) => {
            // Identity gate failed: the credential has already been cleared;
            // stay logged out on the auth view.
            app.view = View::Auth;
            app.auth_error = Some(err.detail());
        }
    }
}
