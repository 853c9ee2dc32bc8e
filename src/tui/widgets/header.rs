use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::CYCLE_DAYS;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate, start_date: NaiveDate, day_number: i64) {
    let title_line = Line::from(vec![
        Span::styled("  🌙 ", theme::dawn()),
        Span::styled(
            "Family Fajr Tracker",
            theme::dawn().add_modifier(Modifier::BOLD),
        ),
    ]);

    let day_line = Line::from(vec![
        Span::styled(
            format!("Day {} / {}", day_number, CYCLE_DAYS),
            theme::bold(),
        ),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(today.format("%A, %b %d, %Y").to_string(), theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(format!("cycle since {}", start_date), theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::dawn())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, day_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
