use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{DailyRecord, PARTICIPANTS};

/// Per-participant point deltas aligned with a list of dates. Every
/// participant always has an entry, even when there are no dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub dates: Vec<NaiveDate>,
    pub points: BTreeMap<String, Vec<i64>>,
}

impl Series {
    fn empty() -> Self {
        Self {
            dates: Vec::new(),
            points: PARTICIPANTS
                .iter()
                .map(|p| (p.to_string(), Vec::new()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn values(&self, participant: &str) -> &[i64] {
        self.points
            .get(participant)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Running totals per participant, with entries ordered by date.
    /// Entries sharing a date keep their submission order.
    pub fn cumulative(&self) -> Series {
        let mut order: Vec<usize> = (0..self.dates.len()).collect();
        order.sort_by_key(|&i| self.dates[i]);

        let mut out = Series::empty();
        out.dates = order.iter().map(|&i| self.dates[i]).collect();
        for (participant, values) in &self.points {
            let mut running = 0;
            let totals = order
                .iter()
                .map(|&i| {
                    running += values.get(i).copied().unwrap_or(0);
                    running
                })
                .collect();
            out.points.insert(participant.clone(), totals);
        }
        out
    }

    /// The last `n` entries.
    pub fn tail(&self, n: usize) -> Series {
        let skip = self.dates.len().saturating_sub(n);
        Series {
            dates: self.dates[skip..].to_vec(),
            points: self
                .points
                .iter()
                .map(|(p, v)| (p.clone(), v.iter().skip(skip).copied().collect()))
                .collect(),
        }
    }
}

/// Re-derive each record's point deltas from its labels, for charting.
pub fn to_series(records: &[DailyRecord]) -> Series {
    let mut series = Series::empty();
    for record in records {
        series.dates.push(record.date);
        for participant in PARTICIPANTS {
            series
                .points
                .entry(participant.to_string())
                .or_default()
                .push(record.points_for(participant));
        }
    }
    series
}
