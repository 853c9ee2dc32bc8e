use unicode_width::UnicodeWidthStr;

/// Signed points, e.g. "+5 pts", "-1 pts", "0 pts"
pub fn format_points(points: i64) -> String {
    if points > 0 {
        format!("+{} pts", points)
    } else {
        format!("{} pts", points)
    }
}

/// Pad to a display width, counting wide glyphs correctly
pub fn pad_right(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

/// Horizontal bar for a value against a maximum. Values at or below zero
/// draw an empty bar.
pub fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return "░".repeat(width);
    }
    let ratio = (value as f64 / max as f64).min(1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_carry_a_sign() {
        assert_eq!(format_points(5), "+5 pts");
        assert_eq!(format_points(0), "0 pts");
        assert_eq!(format_points(-3), "-3 pts");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_right("Ali", 6), "Ali   ");
        assert_eq!(pad_right("Shaheer", 3), "Shaheer");
    }

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(5, 10, 4), "██░░");
        assert_eq!(bar(20, 10, 4), "████");
        assert_eq!(bar(-2, 10, 4), "░░░░");
        assert_eq!(bar(3, 0, 2), "░░");
    }
}
