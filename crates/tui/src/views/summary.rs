use moodroom_client::summary::EMPTY_SUMMARY_PLACEHOLDER;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::App;
use crate::theme::Theme;
use crate::ui::{centered_rect, hint_line};

pub fn render(frame: &mut Frame, app: &App) {
    let card = centered_rect(frame.area(), 72, 20);
    let block = Theme::block_accent()
        .title(" Conversation Summary ")
        .title_style(Style::new().fg(Theme::ACCENT_BLUE).bold())
        .padding(Theme::PADDING_CARD);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let [text_area, hints_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let text = app
        .summary_text
        .as_deref()
        .unwrap_or(EMPTY_SUMMARY_PLACEHOLDER);
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::new().fg(Theme::TEXT_PRIMARY))
            .wrap(Wrap { trim: false }),
        text_area,
    );

    frame.render_widget(
        Paragraph::new(hint_line(&[("Esc", "back to chat")])).alignment(Alignment::Center),
        hints_area,
    );
}
