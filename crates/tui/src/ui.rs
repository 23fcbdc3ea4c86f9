use ratatui::prelude::*;

use crate::app::{App, View};
use crate::views;

pub fn render(frame: &mut Frame, app: &App) {
    match app.view {
        View::Auth => views::auth::render(frame, app),
        View::Chat => views::chat::render(frame, app),
        View::Summary => views::summary::render(frame, app),
    }
}

/// Center a `width` × `height` box inside `area`, clamped to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Footer hint line: alternating key / description spans.
pub(crate) fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    use crate::theme::Theme;

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::new().fg(Theme::TEXT_MUTED)));
        }
        spans.push(Span::styled(*key, Style::new().fg(Theme::TEXT_KEY)));
        spans.push(Span::styled(
            format!(" {desc}"),
            Style::new().fg(Theme::TEXT_KEY_DESC),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::centered_rect;
    use ratatui::prelude::Rect;

    #[test]
    fn centered_rect_is_clamped_to_the_area() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(area, 100, 100);
        assert_eq!(rect, area);
    }

    #[test]
    fn centered_rect_centers_smaller_boxes() {
        let area = Rect::new(0, 0, 40, 20);
        let rect = centered_rect(area, 10, 4);
        assert_eq!(rect, Rect::new(15, 8, 10, 4));
    }
}
