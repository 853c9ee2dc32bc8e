use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{points_for_label, DailyRecord, PARTICIPANTS};
use crate::tui::theme;

/// Lines drawn for `records` entries: a date, one line per participant and
/// a blank separator each, or the two-line placeholder when there are none.
pub fn line_count(records: usize) -> usize {
    if records == 0 {
        2
    } else {
        records * (PARTICIPANTS.len() + 2)
    }
}

pub fn render<'a>(
    frame: &mut Frame,
    area: Rect,
    records: impl Iterator<Item = &'a DailyRecord>,
    scroll: u16,
) {
    let block = Block::default()
        .title(Span::styled(
            " Past Records (most recent first)  [Esc] back ",
            theme::dawn(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    let mut lines = Vec::new();
    for record in records {
        lines.push(Line::from(Span::styled(
            format!("  {}", record.date),
            theme::bold().add_modifier(Modifier::UNDERLINED),
        )));
        for participant in PARTICIPANTS {
            let (label, style) = match record.label_for(participant) {
                Some(label) => (label, theme::points(points_for_label(label))),
                None => ("—", theme::dim()),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("    • {:<9}", participant), theme::dim()),
                Span::styled(label.to_string(), style),
            ]));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  No past records yet.", theme::dim())));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
