use moodroom_core::emotion;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::theme::{user_color, Theme};
use crate::ui::hint_line;
use moodroom_client::{MessageBubble, ViewEntry};

pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, messages_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, app);
    render_messages(frame, messages_area, app);
    render_input(frame, input_area, app);
    render_footer(frame, footer_area, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Theme::block().title(" moodroom ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let username = app
        .session
        .as_ref()
        .map(|s| s.username().to_string())
        .unwrap_or_default();
    let mood_label = format!("{} {}", emotion::glyph(&app.mood), app.mood);

    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(mood_label.chars().count() as u16 + 8),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(username, Style::new().fg(Theme::ACCENT_BLUE).bold()),
            Span::styled("  in the chatroom", Style::new().fg(Theme::TEXT_SECONDARY)),
        ])),
        left,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("mood ", Style::new().fg(Theme::TEXT_SECONDARY)),
            Span::styled(mood_label, Style::new().fg(Theme::ACCENT_YELLOW)),
        ]))
        .alignment(Alignment::Right),
        right,
    );
}

fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let block = Theme::block().title(" Messages ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for entry in app.conversation.entries() {
        match entry {
            ViewEntry::Bubble(bubble) => push_bubble(&mut lines, bubble, app, width),
            ViewEntry::Notice(text) => {
                lines.push(
                    Line::styled(
                        text.clone(),
                        Style::new().fg(Theme::NOTICE).italic(),
                    )
                    .alignment(Alignment::Center),
                );
                lines.push(Line::default());
            }
            ViewEntry::Alert(text) => {
                lines.push(
                    Line::styled(
                        format!("⚠ {text}"),
                        Style::new().fg(Theme::ACCENT_YELLOW).italic().bold(),
                    )
                    .alignment(Alignment::Center),
                );
                lines.push(Line::default());
            }
        }
    }

    let top = app
        .scroll
        .top_offset(lines.len() as u16, inner.height.max(1));
    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), inner);
}

fn push_bubble(lines: &mut Vec<Line>, bubble: &MessageBubble, app: &App, width: usize) {
    let alignment = if bubble.sent {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let name_color = if bubble.sent {
        Theme::SENT_NAME
    } else {
        user_color(&bubble.username)
    };

    let mut meta = vec![Span::styled(
        bubble.username.clone(),
        Style::new().fg(name_color).bold(),
    )];
    if let Some(ts) = bubble.timestamp {
        meta.push(Span::styled(
            format!("  {}", ts.with_timezone(&chrono::Local).format("%H:%M")),
            Style::new().fg(Theme::TEXT_MUTED),
        ));
    }
    lines.push(Line::from(meta).alignment(alignment));

    // Entrance accent for freshly arrived live messages; it decays as the
    // loop keeps redrawing.
    let body_style = if bubble.live && app.entrance_accent(bubble.id.as_str()) {
        Style::new().fg(Theme::TEXT_PRIMARY).bold()
    } else {
        Style::new().fg(Theme::TEXT_PRIMARY)
    };

    let text = format!("{} {}", bubble.content, bubble.glyph());
    for chunk in wrap_width(&text, width.saturating_sub(2).max(8)) {
        lines.push(Line::styled(chunk, body_style).alignment(alignment));
    }
    lines.push(Line::default());
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let ready = app.channel_open
        && app
            .session
            .as_ref()
            .is_some_and(|session| session.channel_ready());
    let block = if ready {
        Theme::block_accent().title(" Message ")
    } else {
        Theme::block().title(" Message (connecting…) ")
    };
    let inner_width = block.inner(area).width.max(1) as usize;

    let mut shown = visible_tail(&app.message_input, inner_width.saturating_sub(1));
    shown.push('▏');

    frame.render_widget(
        Paragraph::new(shown)
            .style(Style::new().fg(Theme::TEXT_PRIMARY))
            .block(block),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.summary_pending {
        Line::styled("Generating summary…", Style::new().fg(Theme::ACCENT_YELLOW))
    } else if let Some(error) = &app.summary_error {
        Line::styled(
            format!("Summary failed: {error}"),
            Style::new().fg(Theme::ACCENT_RED),
        )
    } else {
        hint_line(&[
            ("Enter", "send"),
            ("Ctrl+S", "summary"),
            ("↑/↓", "scroll"),
            ("End", "newest"),
            ("Ctrl+L", "logout"),
        ])
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Greedy display-width wrap; chat lines have no layout to preserve.
fn wrap_width(text: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(ch);
        used += w;
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Last portion of `text` that fits in `width` display columns.
fn visible_tail(text: &str, width: usize) -> String {
    let mut used = 0usize;
    let mut chars: Vec<char> = Vec::new();
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        chars.push(ch);
        used += w;
    }
    chars.into_iter().rev().collect()
}
