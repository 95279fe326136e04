//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::filter::RecordFilter;
use crate::record::StudentRecord;

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Data file to use (overrides config)
    #[arg(short, long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
#[command(group = clap::ArgGroup::new("filter").multiple(false))]
pub struct ListCommand {
    /// Case-insensitive match on name, program or gender
    #[arg(short, long, group = "filter")]
    pub search: Option<String>,

    /// Only male students
    #[arg(long, group = "filter")]
    pub male: bool,

    /// Only female students
    #[arg(long, group = "filter")]
    pub female: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl ListCommand {
    /// The view filter selected by the flags.
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        if let Some(query) = &self.search {
            RecordFilter::text(query)
        } else if self.male {
            RecordFilter::male()
        } else if self.female {
            RecordFilter::female()
        } else {
            RecordFilter::All
        }
    }
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Unique student id
    #[arg(long)]
    pub student_id: String,

    /// Full name
    #[arg(long)]
    pub full_name: String,

    /// Gmail address
    #[arg(long)]
    pub gmail: String,

    /// Gender ("male" or "female")
    #[arg(long)]
    pub gender: Option<String>,

    /// Degree program
    #[arg(long)]
    pub program: Option<String>,

    /// Year level
    #[arg(long)]
    pub year_level: Option<String>,

    /// University
    #[arg(long)]
    pub university: Option<String>,
}

impl AddCommand {
    /// Build the candidate record. Options not given are left out of it.
    #[must_use]
    pub fn into_record(self) -> StudentRecord {
        StudentRecord {
            gender: self.gender.into(),
            program: self.program.into(),
            year_level: self.year_level.into(),
            university: self.university.into(),
            ..StudentRecord::new(self.student_id, self.full_name, self.gmail)
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the student to delete
    pub student_id: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
