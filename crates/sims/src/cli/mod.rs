//! Command-line interface for sims.
//!
//! This module provides the CLI structure for the `sims` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AddCommand, ConfigCommand, DeleteCommand, ListCommand, ServeCommand};

/// sims - Student information management service
///
/// Serves a small student roster over a JSON HTTP API and a browser page,
/// persisting every change to a single JSON file.
#[derive(Debug, Parser)]
#[command(name = "sims")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeCommand),

    /// List students in the data file
    List(ListCommand),

    /// Add a student to the data file
    Add(AddCommand),

    /// Delete a student from the data file
    Delete(DeleteCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "sims");
    }

    #[test]
    fn test_verbosity_flags() {
        use crate::logging::Verbosity;

        assert_eq!(parse(&["sims", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["sims", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["sims", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["sims", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = parse(&["sims", "serve", "--port", "8080", "--data-file", "x.json"]);
        let Command::Serve(serve) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(serve.port, Some(8080));
        assert_eq!(serve.data_file, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_parse_list_filters_conflict() {
        assert!(Cli::try_parse_from(["sims", "list", "--male", "--female"]).is_err());
        assert!(Cli::try_parse_from(["sims", "list", "--search", "ann", "--male"]).is_err());
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "sims",
            "add",
            "--student-id",
            "S1",
            "--full-name",
            "Ann Lee",
            "--gmail",
            "ann@gmail.com",
            "--year-level",
            "2",
        ]);
        let Command::Add(add) = cli.command else {
            panic!("expected add");
        };
        let record = add.into_record();
        assert_eq!(record.student_id, "S1");
        assert_eq!(record.full_name, "Ann Lee");
        assert_eq!(record.year_level, "2");
        assert!(record.program.is_absent());
        assert!(!serde_json::to_string(&record).unwrap().contains("program"));
    }

    #[test]
    fn test_parse_delete() {
        let cli = parse(&["sims", "delete", "S1"]);
        assert!(matches!(cli.command, Command::Delete(DeleteCommand { ref student_id }) if student_id == "S1"));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["sims", "-c", "/custom/config.toml", "config", "show"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Show { json: false })));
    }
}
