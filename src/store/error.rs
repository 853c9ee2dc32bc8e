use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file is not valid JSON, lacks a field, or carries a date
    /// that does not parse.
    #[error("Malformed data file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("A record for {0} already exists in this cycle")]
    DuplicateDate(NaiveDate),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("No selection given for {0}")]
    MissingSelection(String),

    #[error("{0} was given more than once")]
    RepeatedParticipant(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
