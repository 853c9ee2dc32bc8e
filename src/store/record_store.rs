use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{Cycle, DailyRecord};
use crate::store::error::{StoreError, StoreResult};

/// What to do when a record is submitted for a date the cycle already has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep both entries and count both.
    #[default]
    Allow,
    /// Refuse the second submission.
    Reject,
}

/// JSON-file backed store for the current cycle.
///
/// Every operation reads or writes the whole document; there is no caching
/// between calls, so the file stays the single source of truth.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    policy: DuplicatePolicy,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> StoreResult<Cycle> {
        self.load_on(today())
    }

    /// Load the persisted cycle as of `today`, starting a new one when none
    /// exists or the stored one has run its course.
    pub fn load_on(&self, today: NaiveDate) -> StoreResult<Cycle> {
        if !self.path.exists() {
            debug!("No data file at {:?}, starting a new cycle", self.path);
            return self.reset_on(today);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let cycle: Cycle =
            serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        if cycle.is_expired(today) {
            info!(
                "Cycle started {} is {} days old, resetting",
                cycle.start_date,
                cycle.age_days(today)
            );
            return self.reset_on(today);
        }

        debug!(
            "Loaded cycle from {:?}: {} records",
            self.path,
            cycle.records.len()
        );
        Ok(cycle)
    }

    pub fn reset(&self) -> StoreResult<Cycle> {
        self.reset_on(today())
    }

    /// Replace whatever is stored with an empty cycle starting `today`.
    pub fn reset_on(&self, today: NaiveDate) -> StoreResult<Cycle> {
        let cycle = Cycle::fresh(today);
        self.save(&cycle)?;
        info!("Started new cycle on {}", today);
        Ok(cycle)
    }

    /// Score `record` into `cycle`, append it and persist the result.
    ///
    /// Under [`DuplicatePolicy::Reject`] a second record for the same date
    /// fails before anything changes.
    pub fn append(&self, cycle: &mut Cycle, record: DailyRecord) -> StoreResult<()> {
        if self.policy == DuplicatePolicy::Reject && cycle.has_record_for(record.date) {
            return Err(StoreError::DuplicateDate(record.date));
        }
        for (participant, label) in record.unknown_labels() {
            warn!(
                "Unknown option {:?} for {} on {}, scoring 0",
                label, participant, record.date
            );
        }
        debug!("Appending record for {}", record.date);
        cycle.apply(record);
        self.save(cycle)
    }

    /// Load the current cycle and append `record` to it.
    pub fn submit(&self, record: DailyRecord) -> StoreResult<Cycle> {
        let mut cycle = self.load()?;
        self.append(&mut cycle, record)?;
        Ok(cycle)
    }

    /// Write the cycle to a sibling temp file, then rename it over the data
    /// file so readers never see a partial document.
    pub fn save(&self, cycle: &Cycle) -> StoreResult<()> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_json(&temp_path, cycle) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        debug!("Saved {} records to {:?}", cycle.records.len(), self.path);
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_json(path: &Path, cycle: &Cycle) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    cycle.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}
