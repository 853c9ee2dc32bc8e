use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fajr", version, author, about = "Family Fajr prayer tracker with 30-day scoring cycles")]
pub struct Cli {
    /// Use this data file instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the cycle day, start date and current points
    Status,
    /// Save today's record, one selection per participant
    Record {
        /// Selections such as `Shaheer=jamaat MSN=alone Ali=qaza`
        #[arg(required = true, value_name = "PARTICIPANT=OPTION")]
        selections: Vec<String>,
    },
    /// Show past records, most recent first
    History {
        /// Number of records to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show cumulative points over the recent entries
    Progress,
    /// Start a new 30-day cycle, discarding the current one
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List participants and attendance options
    Options,
}
