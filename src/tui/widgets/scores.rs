use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{Cycle, PARTICIPANTS};
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, cycle: &Cycle) {
    let block = Block::default()
        .title(Span::styled(" Current Points ", theme::dawn()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, PARTICIPANTS.len() as u32);
            PARTICIPANTS.len()
        ])
        .split(inner);

    for (i, participant) in PARTICIPANTS.iter().enumerate() {
        let points = cycle.score(participant);
        let text = vec![
            Line::from(Span::styled(*participant, theme::dim())),
            Line::from(Span::styled(
                format!("{} pts", points),
                theme::points(points).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(
            Paragraph::new(text).alignment(ratatui::layout::Alignment::Center),
            columns[i],
        );
    }
}
