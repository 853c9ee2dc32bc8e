use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::models::attendance::{
    canonical_participant, points_for_label, AttendanceOption, CYCLE_DAYS, PARTICIPANTS,
};
use crate::store::{StoreError, StoreResult};

/// One day's submission: the chosen option label for each participant.
///
/// Serialized flat, so a record reads
/// `{"date": "2024-01-01", "Ali": "Fajr Qaza (-1)", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub selections: BTreeMap<String, String>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            selections: BTreeMap::new(),
        }
    }

    /// Set a raw label for a participant. The label is stored as given.
    pub fn with_label(mut self, participant: &str, label: &str) -> Self {
        self.selections
            .insert(participant.to_string(), label.to_string());
        self
    }

    /// Build a record from user choices. Every participant must be chosen
    /// exactly once.
    pub fn from_choices<'a, I>(date: NaiveDate, choices: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (&'a str, AttendanceOption)>,
    {
        let mut record = Self::new(date);
        for (name, option) in choices {
            let participant = canonical_participant(name)
                .ok_or_else(|| StoreError::UnknownParticipant(name.to_string()))?;
            if record.selections.contains_key(participant) {
                return Err(StoreError::RepeatedParticipant(participant.to_string()));
            }
            record = record.with_label(participant, option.label());
        }
        if let Some(missing) = PARTICIPANTS
            .iter()
            .find(|p| !record.selections.contains_key(**p))
        {
            return Err(StoreError::MissingSelection(missing.to_string()));
        }
        Ok(record)
    }

    pub fn label_for(&self, participant: &str) -> Option<&str> {
        self.selections.get(participant).map(String::as_str)
    }

    /// Points re-derived from the stored label; missing or unknown labels
    /// score 0.
    pub fn points_for(&self, participant: &str) -> i64 {
        self.label_for(participant).map(points_for_label).unwrap_or(0)
    }

    /// Participants whose stored label is not in the option table.
    pub fn unknown_labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .filter(|(_, label)| AttendanceOption::from_label(label).is_none())
            .map(|(p, label)| (p.as_str(), label.as_str()))
    }
}

impl Serialize for DailyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.selections.len() + 1))?;
        map.serialize_entry("date", &self.date)?;
        for (participant, label) in in_participant_order(&self.selections) {
            map.serialize_entry(participant, label)?;
        }
        map.end()
    }
}

/// Known participants in display order, then any other keys as stored.
fn in_participant_order<V>(map: &BTreeMap<String, V>) -> impl Iterator<Item = (&String, &V)> {
    let known = PARTICIPANTS.iter().filter_map(move |p| map.get_key_value(*p));
    let others = map
        .iter()
        .filter(|(name, _)| !PARTICIPANTS.contains(&name.as_str()));
    known.chain(others)
}

fn serialize_scores<S: Serializer>(
    scores: &BTreeMap<String, i64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(in_participant_order(scores))
}

/// The active scoring window and everything recorded in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub start_date: NaiveDate,
    #[serde(serialize_with = "serialize_scores")]
    pub scores: BTreeMap<String, i64>,
    pub records: Vec<DailyRecord>,
}

impl Cycle {
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            scores: PARTICIPANTS.iter().map(|p| (p.to_string(), 0)).collect(),
            records: Vec::new(),
        }
    }

    /// Whole days elapsed since the cycle started.
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.start_date).num_days()
    }

    /// 1-based day of the cycle.
    pub fn day_number(&self, today: NaiveDate) -> i64 {
        self.age_days(today) + 1
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.age_days(today) >= CYCLE_DAYS
    }

    pub fn score(&self, participant: &str) -> i64 {
        self.scores.get(participant).copied().unwrap_or(0)
    }

    pub fn has_record_for(&self, date: NaiveDate) -> bool {
        self.records.iter().any(|r| r.date == date)
    }

    /// Add a record's points to the running scores and append it.
    pub fn apply(&mut self, record: DailyRecord) {
        for participant in PARTICIPANTS {
            *self.scores.entry(participant.to_string()).or_insert(0) +=
                record.points_for(participant);
        }
        self.records.push(record);
    }

    /// The last `n` records, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &DailyRecord> {
        self.records.iter().rev().take(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn fresh_cycle_has_zero_scores() {
        let cycle = Cycle::fresh(date("2024-01-01"));
        assert_eq!(cycle.scores.len(), PARTICIPANTS.len());
        assert!(cycle.scores.values().all(|s| *s == 0));
        assert!(cycle.records.is_empty());
        assert_eq!(cycle.day_number(date("2024-01-01")), 1);
    }

    #[test]
    fn expiry_starts_at_thirty_days() {
        let cycle = Cycle::fresh(date("2024-01-01"));
        assert!(!cycle.is_expired(date("2024-01-30")));
        assert_eq!(cycle.day_number(date("2024-01-30")), 30);
        assert!(cycle.is_expired(date("2024-01-31")));
    }

    #[test]
    fn apply_accumulates_points() {
        let mut cycle = Cycle::fresh(date("2024-01-01"));
        let record = DailyRecord::new(date("2024-01-01"))
            .with_label("Shaheer", "Fajr with Jamaat (+5)")
            .with_label("MSN", "Fajr prayed alone (+2)")
            .with_label("Ali", "Fajr Qaza (-1)");
        cycle.apply(record.clone());
        cycle.apply(record);
        assert_eq!(cycle.score("Shaheer"), 10);
        assert_eq!(cycle.score("MSN"), 4);
        assert_eq!(cycle.score("Ali"), -2);
        assert_eq!(cycle.records.len(), 2);
    }

    #[test]
    fn record_serializes_flat() {
        let record = DailyRecord::new(date("2024-01-01")).with_label("Ali", "Fajr Qaza (-1)");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": "2024-01-01", "Ali": "Fajr Qaza (-1)"})
        );
        let back: DailyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn participants_are_written_in_display_order() {
        let mut cycle = Cycle::fresh(date("2024-01-01"));
        cycle.apply(
            DailyRecord::new(date("2024-01-01"))
                .with_label("Ali", "Fajr Qaza (-1)")
                .with_label("Zaid", "Fajr Qaza (-1)")
                .with_label("Shaheer", "Fajr with Jamaat (+5)")
                .with_label("MSN", "Fajr prayed alone (+2)"),
        );
        let json = serde_json::to_string(&cycle).unwrap();

        let scores = &json[json.find("\"scores\"").unwrap()..json.find("\"records\"").unwrap()];
        let at = |s: &str, key: &str| s.find(&format!("\"{}\"", key)).unwrap();
        assert!(at(scores, "Shaheer") < at(scores, "MSN"));
        assert!(at(scores, "MSN") < at(scores, "Ali"));

        let record = &json[json.find("\"records\"").unwrap()..];
        assert!(at(record, "date") < at(record, "Shaheer"));
        assert!(at(record, "Shaheer") < at(record, "MSN"));
        assert!(at(record, "MSN") < at(record, "Ali"));
        assert!(at(record, "Ali") < at(record, "Zaid"));

        let back: Cycle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cycle);
    }

    #[test]
    fn from_choices_requires_every_participant_once() {
        let today = date("2024-01-01");
        let ok = DailyRecord::from_choices(
            today,
            [
                ("shaheer", AttendanceOption::Jamaat),
                ("MSN", AttendanceOption::Alone),
                ("Ali", AttendanceOption::Qaza),
            ],
        )
        .unwrap();
        assert_eq!(ok.label_for("Shaheer"), Some("Fajr with Jamaat (+5)"));

        let missing = DailyRecord::from_choices(today, [("Ali", AttendanceOption::Qaza)]);
        assert!(matches!(missing, Err(StoreError::MissingSelection(_))));

        let repeated = DailyRecord::from_choices(
            today,
            [("Ali", AttendanceOption::Qaza), ("ali", AttendanceOption::Alone)],
        );
        assert!(matches!(repeated, Err(StoreError::RepeatedParticipant(_))));

        let stranger = DailyRecord::from_choices(today, [("Bilal", AttendanceOption::Qaza)]);
        assert!(matches!(stranger, Err(StoreError::UnknownParticipant(_))));
    }

    #[test]
    fn recent_is_most_recent_first() {
        let mut cycle = Cycle::fresh(date("2024-01-01"));
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            cycle.apply(DailyRecord::new(date(day)));
        }
        let dates: Vec<_> = cycle.recent(2).map(|r| r.date).collect();
        assert_eq!(dates, vec![date("2024-01-03"), date("2024-01-02")]);
    }
}
