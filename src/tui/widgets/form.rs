use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::{AttendanceOption, PARTICIPANTS};
use crate::tui::theme;

/// Today's form: one option selector per participant.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    selections: &[AttendanceOption],
    focused_idx: usize,
    saved_today: bool,
) {
    let title = if saved_today {
        Span::styled(" Record Today's Fajr  ✓ saved ", theme::green())
    } else {
        Span::styled(" Record Today's Fajr ", theme::dawn())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    let mut items: Vec<ListItem> = PARTICIPANTS
        .iter()
        .zip(selections)
        .enumerate()
        .map(|(i, (participant, option))| {
            let is_focused = i == focused_idx;
            let marker = if is_focused { "▸ " } else { "  " };
            let name_style = if is_focused {
                theme::dawn().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{:<9}", marker, participant), name_style),
                Span::styled("◂ ", theme::dim()),
                Span::styled(format!("{:<24}", option.label()), theme::points(option.points())),
                Span::styled(" ▸", theme::dim()),
            ]))
        })
        .collect();

    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
        "  [←/→] choose  ·  [Enter] save today's record",
        theme::dim(),
    ))));

    frame.render_widget(List::new(items).block(block), area);
}
