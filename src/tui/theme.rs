use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(12, 20, 16);
pub const SURFACE: Color = Color::Rgb(20, 32, 26);
pub const BORDER: Color = Color::Rgb(44, 70, 56);
pub const TEXT: Color = Color::Rgb(226, 236, 228);
pub const TEXT_DIM: Color = Color::Rgb(120, 140, 128);
pub const DAWN: Color = Color::Rgb(232, 176, 96);
pub const GREEN: Color = Color::Rgb(96, 176, 120);
pub const RED: Color = Color::Rgb(196, 92, 76);

/// Line colours for the participants, in display order.
pub const SERIES: [Color; 3] = [
    Color::Rgb(96, 176, 120),
    Color::Rgb(232, 176, 96),
    Color::Rgb(120, 160, 220),
];

pub fn series_color(idx: usize) -> Color {
    SERIES[idx % SERIES.len()]
}

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn dawn() -> Style {
    Style::default().fg(DAWN)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    if focused {
        dawn()
    } else {
        Style::default().fg(BORDER)
    }
}

/// Green for gains, red for losses.
pub fn points(value: i64) -> Style {
    match value {
        v if v > 0 => green(),
        v if v < 0 => red(),
        _ => dim(),
    }
}
