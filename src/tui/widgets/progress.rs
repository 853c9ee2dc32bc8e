use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::PARTICIPANTS;
use crate::store::Series;
use crate::tui::theme;

/// Cumulative points per participant. `series` is expected to be the
/// already cumulated and windowed view.
pub fn render(frame: &mut Frame, area: Rect, series: &Series) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Progress (last {} entries) ", series.len()),
            theme::dawn(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    if series.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No records yet — save today's record to see progress.",
                theme::dim(),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = PARTICIPANTS
        .iter()
        .map(|p| {
            series
                .values(p)
                .iter()
                .enumerate()
                .map(|(x, y)| (x as f64, *y as f64))
                .collect()
        })
        .collect();

    let (low, high) = points
        .iter()
        .flatten()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    let high = if high - low < 1.0 { low + 1.0 } else { high };

    let datasets = PARTICIPANTS
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (participant, data))| {
            Dataset::default()
                .name(*participant)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::series_color(i)))
                .data(data)
        })
        .collect::<Vec<_>>();

    let last_x = series.len().saturating_sub(1).max(1) as f64;
    let first_date = series.dates.first().map(|d| d.format("%m-%d").to_string());
    let last_date = series.dates.last().map(|d| d.format("%m-%d").to_string());

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::dim())
                .bounds([0.0, last_x])
                .labels(vec![
                    Span::styled(first_date.unwrap_or_default(), theme::dim()),
                    Span::styled(last_date.unwrap_or_default(), theme::dim()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim())
                .bounds([low, high])
                .labels(vec![
                    Span::styled(format!("{}", low), theme::dim()),
                    Span::styled(format!("{}", high), theme::dim()),
                ]),
        );

    frame.render_widget(chart, area);
}
