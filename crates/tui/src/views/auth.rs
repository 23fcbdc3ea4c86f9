use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, AuthField, AuthMode};
use crate::theme::Theme;
use crate::ui::{centered_rect, hint_line};

pub fn render(frame: &mut Frame, app: &App) {
    let card = centered_rect(frame.area(), 48, 16);
    let block = Theme::block_accent()
        .title(format!(" {} ", app.auth_mode.title()))
        .title_style(Style::new().fg(Theme::ACCENT_BLUE).bold())
        .padding(Theme::PADDING_CARD);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [username_area, password_area, status_area, _, hints_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(inner);

    render_field(
        frame,
        username_area,
        "Username",
        &app.username_input,
        app.auth_field == AuthField::Username,
        false,
    );
    render_field(
        frame,
        password_area,
        "Password",
        &app.password_input,
        app.auth_field == AuthField::Password,
        true,
    );

    let status = if app.auth_pending {
        let label = match app.auth_mode {
            AuthMode::Login => "Signing in…",
            AuthMode::Signup => "Creating account…",
        };
        Some(Line::styled(label, Style::new().fg(Theme::ACCENT_YELLOW)))
    } else if let Some(error) = &app.auth_error {
        Some(Line::styled(
            error.clone(),
            Style::new().fg(Theme::ACCENT_RED),
        ))
    } else {
        app.auth_notice.as_ref().map(|notice| {
            Line::styled(notice.clone(), Style::new().fg(Theme::ACCENT_GREEN))
        })
    };
    if let Some(line) = status {
        frame.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .wrap(ratatui::widgets::Wrap { trim: true }),
            status_area,
        );
    }

    let hints = Paragraph::new(vec![
        hint_line(&[("Enter", "submit"), ("Tab", "switch field")]),
        hint_line(&[
            ("Ctrl+T", app.auth_mode.toggle_hint()),
            ("Esc", "quit"),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hints, hints_area);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) {
    let block = if focused {
        Theme::block_accent().title(format!(" {label} "))
    } else {
        Theme::block().title(format!(" {label} "))
    };

    let mut shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    if focused {
        shown.push('▏');
    }

    frame.render_widget(
        Paragraph::new(shown)
            .style(Style::new().fg(Theme::TEXT_PRIMARY))
            .block(block),
        area,
    );
}
