use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};

use crate::models::{AttendanceOption, DailyRecord, CYCLE_DAYS, PARTICIPANTS};
use crate::store::{to_series, today, RecordStore};
use crate::utils::format::{bar, format_points, pad_right};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

const NAME_WIDTH: usize = 10;

fn score_color(points: i64) -> &'static str {
    match points {
        p if p > 0 => GREEN,
        p if p < 0 => RED,
        _ => DIM,
    }
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn handle_status(store: &RecordStore) -> Result<()> {
    let today = today();
    let cycle = store.load_on(today)?;

    println!();
    println_colored!(
        GOLD,
        "  Fajr Tracker — Day {} / {}",
        cycle.day_number(today),
        CYCLE_DAYS
    );
    println_colored!(
        DIM,
        "  Cycle started {}  ·  {} records saved",
        cycle.start_date,
        cycle.records.len()
    );
    println!();

    for participant in PARTICIPANTS {
        let points = cycle.score(participant);
        println_colored!(
            score_color(points),
            "  {}  {}",
            pad_right(participant, NAME_WIDTH),
            format_points(points)
        );
    }

    if !cycle.has_record_for(today) {
        println!();
        println_colored!(AMBER, "  Today's record has not been saved yet");
    }
    println!();
    Ok(())
}

// ─── Record ──────────────────────────────────────────────────────────────────

pub fn handle_record(store: &RecordStore, selections: &[String]) -> Result<()> {
    let choices = selections
        .iter()
        .map(|s| parse_selection(s))
        .collect::<Result<Vec<_>>>()?;
    let record = DailyRecord::from_choices(
        today(),
        choices.iter().map(|(name, option)| (name.as_str(), *option)),
    )?;

    let date = record.date;
    let cycle = store.submit(record)?;

    println!();
    println_colored!(GREEN, "  ✓ Record for {} saved", date);
    println!();
    for (name, option) in &choices {
        println!(
            "  {}  {:<24} {}",
            pad_right(name, NAME_WIDTH),
            option.label(),
            format_points(option.points())
        );
    }
    println!();
    println_colored!(BOLD, "  Totals");
    for participant in PARTICIPANTS {
        let points = cycle.score(participant);
        println_colored!(
            score_color(points),
            "  {}  {}",
            pad_right(participant, NAME_WIDTH),
            format_points(points)
        );
    }
    println!();
    Ok(())
}

/// Parse `NAME=OPTION`, e.g. `Ali=qaza` or `MSN=2`.
fn parse_selection(s: &str) -> Result<(String, AttendanceOption)> {
    let (name, option) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected PARTICIPANT=OPTION, got '{}'", s))?;
    let option = option.parse::<AttendanceOption>().map_err(|_| {
        anyhow!(
            "Unknown option '{}' for {}. Use: jamaat, alone, qaza",
            option,
            name
        )
    })?;
    Ok((name.trim().to_string(), option))
}

// ─── History ─────────────────────────────────────────────────────────────────

pub fn handle_history(store: &RecordStore, limit: usize) -> Result<()> {
    let cycle = store.load()?;

    println!();
    if cycle.records.is_empty() {
        println_colored!(DIM, "  No past records yet");
        println!();
        return Ok(());
    }

    println_colored!(GOLD, "  Past Records (most recent first)");
    for record in cycle.recent(limit) {
        println!();
        println_colored!(BOLD, "  {}", record.date);
        for participant in PARTICIPANTS {
            let label = record.label_for(participant).unwrap_or("—");
            println!("  • {}: {}", participant, label);
        }
    }
    println!();
    Ok(())
}

// ─── Progress ────────────────────────────────────────────────────────────────

pub fn handle_progress(store: &RecordStore, window: usize) -> Result<()> {
    let cycle = store.load()?;
    let series = to_series(&cycle.records).cumulative().tail(window);

    println!();
    if series.is_empty() {
        println_colored!(DIM, "  No records yet — save today's record to see progress");
        println!();
        return Ok(());
    }

    println_colored!(GOLD, "  Progress (last {} entries)", series.len());
    println!();

    let mut header = format!("  {}", pad_right("Date", 12));
    for participant in PARTICIPANTS {
        header.push_str(&pad_right(participant, NAME_WIDTH));
    }
    println_colored!(DIM, "{}", header);

    for (i, date) in series.dates.iter().enumerate() {
        let mut row = format!("  {}", pad_right(&date.to_string(), 12));
        for participant in PARTICIPANTS {
            let total = series.values(participant).get(i).copied().unwrap_or(0);
            row.push_str(&pad_right(&total.to_string(), NAME_WIDTH));
        }
        println!("{}", row);
    }

    println!();
    let finals: Vec<i64> = PARTICIPANTS
        .iter()
        .map(|p| series.values(p).last().copied().unwrap_or(0))
        .collect();
    let max = finals.iter().copied().max().unwrap_or(0);
    for (participant, total) in PARTICIPANTS.iter().zip(&finals) {
        println_colored!(
            score_color(*total),
            "  {}  {}  {}",
            pad_right(participant, NAME_WIDTH),
            bar(*total, max, 20),
            total
        );
    }
    println!();
    Ok(())
}

// ─── Reset ───────────────────────────────────────────────────────────────────

pub fn handle_reset(store: &RecordStore, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("  Start a new 30-day cycle? All points and records will be cleared [y/N] ")?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println_colored!(DIM, "  Reset cancelled");
            return Ok(());
        }
    }

    let cycle = store.reset()?;
    println_colored!(GREEN, "  ✓ New cycle started on {}", cycle.start_date);
    Ok(())
}

// ─── Options ─────────────────────────────────────────────────────────────────

pub fn handle_options() -> Result<()> {
    println!();
    println_colored!(GOLD, "  Participants");
    println!("  {}", PARTICIPANTS.join(", "));
    println!();
    println_colored!(GOLD, "  Options");
    for option in AttendanceOption::all() {
        println!(
            "  {}  {:<24} {}",
            pad_right(option.key(), 8),
            option.label(),
            format_points(option.points())
        );
    }
    println!();
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_option() {
        let (name, option) = parse_selection("Ali=qaza").unwrap();
        assert_eq!(name, "Ali");
        assert_eq!(option, AttendanceOption::Qaza);

        let (name, option) = parse_selection(" msn =+2").unwrap();
        assert_eq!(name, "msn");
        assert_eq!(option, AttendanceOption::Alone);
    }

    #[test]
    fn rejects_malformed_selections() {
        assert!(parse_selection("Ali").is_err());
        assert!(parse_selection("Ali=sometimes").is_err());
    }

    #[test]
    fn score_colors_follow_sign() {
        assert_eq!(score_color(3), GREEN);
        assert_eq!(score_color(-1), RED);
        assert_eq!(score_color(0), DIM);
    }
}
