use std::str::FromStr;

/// The household members being tracked, in display order.
pub const PARTICIPANTS: [&str; 3] = ["Shaheer", "MSN", "Ali"];

/// Length of a scoring cycle. A cycle whose start date is this many days in
/// the past is discarded on the next load.
pub const CYCLE_DAYS: i64 = 30;

/// Resolve a participant name case-insensitively to its canonical spelling.
pub fn canonical_participant(name: &str) -> Option<&'static str> {
    PARTICIPANTS
        .iter()
        .copied()
        .find(|p| p.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AttendanceOption {
    #[default]
    Jamaat,
    Alone,
    Qaza,
}

impl AttendanceOption {
    pub fn all() -> [AttendanceOption; 3] {
        [
            AttendanceOption::Jamaat,
            AttendanceOption::Alone,
            AttendanceOption::Qaza,
        ]
    }

    /// Exact label text stored in each daily record.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceOption::Jamaat => "Fajr with Jamaat (+5)",
            AttendanceOption::Alone => "Fajr prayed alone (+2)",
            AttendanceOption::Qaza => "Fajr Qaza (-1)",
        }
    }

    pub fn points(&self) -> i64 {
        match self {
            AttendanceOption::Jamaat => 5,
            AttendanceOption::Alone => 2,
            AttendanceOption::Qaza => -1,
        }
    }

    /// Short name accepted on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            AttendanceOption::Jamaat => "jamaat",
            AttendanceOption::Alone => "alone",
            AttendanceOption::Qaza => "qaza",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|o| o.label() == label)
    }

    pub fn next(&self) -> Self {
        match self {
            AttendanceOption::Jamaat => AttendanceOption::Alone,
            AttendanceOption::Alone => AttendanceOption::Qaza,
            AttendanceOption::Qaza => AttendanceOption::Jamaat,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            AttendanceOption::Jamaat => AttendanceOption::Qaza,
            AttendanceOption::Alone => AttendanceOption::Jamaat,
            AttendanceOption::Qaza => AttendanceOption::Alone,
        }
    }
}

impl std::fmt::Display for AttendanceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AttendanceOption {
    type Err = anyhow::Error;

    /// Accepts the short key, the point value, or the exact label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(option) = Self::from_label(s) {
            return Ok(option);
        }
        match s.to_lowercase().as_str() {
            "jamaat" | "jamaah" | "5" | "+5" => Ok(AttendanceOption::Jamaat),
            "alone" | "2" | "+2" => Ok(AttendanceOption::Alone),
            "qaza" | "qada" | "-1" => Ok(AttendanceOption::Qaza),
            _ => Err(anyhow::anyhow!("Unknown attendance option: {}", s)),
        }
    }
}

/// Point value of a stored label. Labels that are not in the option table
/// score nothing.
pub fn points_for_label(label: &str) -> i64 {
    AttendanceOption::from_label(label)
        .map(|o| o.points())
        .unwrap_or(0)
}
