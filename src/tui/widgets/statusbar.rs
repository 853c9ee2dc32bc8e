use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Key hints, or the latest flash message when there is one.
pub fn render(frame: &mut Frame, area: Rect, flash: Option<(&str, bool)>) {
    let line = match flash {
        Some((text, true)) => Line::from(Span::styled(format!("✗ {}", text), theme::red())),
        Some((text, false)) => Line::from(Span::styled(format!("✓ {}", text), theme::green())),
        None => {
            let hints = [
                ("[↑↓]", " member  "),
                ("[←→]", " option  "),
                ("[Enter]", " save  "),
                ("[h]", " history  "),
                ("[R]", " reset  "),
                ("[?]", " help  "),
                ("[Esc]", " quit"),
            ];
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(key, theme::dawn()));
                spans.push(Span::styled(label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
