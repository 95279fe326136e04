//! `sims` - CLI and server binary for the student information service.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use sims::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand, ServeCommand,
};
use sims::{init_logging, Config, JsonFileStore, StudentRecord, StudentService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(config, serve_cmd).await,
        Command::List(list_cmd) => handle_list(&config, &list_cmd).await,
        Command::Add(add_cmd) => handle_add(&config, add_cmd).await,
        Command::Delete(delete_cmd) => handle_delete(&config, &delete_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn open_service(config: &Config) -> anyhow::Result<StudentService> {
    let store = JsonFileStore::open(config.data_file())
        .await
        .with_context(|| format!("opening {}", config.data_file().display()))?;
    Ok(StudentService::with_policy(
        Arc::new(store),
        config.validation_policy(),
    ))
}

async fn handle_serve(mut config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    if let Some(data_file) = cmd.data_file {
        config.storage.data_file = data_file;
    }
    config.validate()?;
    sims::server::run(&config).await.context("server failed")
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let records = open_service(config).await?.list().await?;
    let records = cmd.filter().apply(records);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No students found.");
    } else {
        print_table(&records);
    }
    Ok(())
}

async fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    open_service(config).await?.create(cmd.into_record()).await?;
    println!("Student added successfully");
    Ok(())
}

async fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    open_service(config).await?.delete(&cmd.student_id).await?;
    println!("Deleted successfully");
    Ok(())
}

fn print_table(records: &[StudentRecord]) {
    const HEADERS: [&str; 7] = [
        "ID",
        "Full Name",
        "Gender",
        "Gmail",
        "Program",
        "Year",
        "University",
    ];

    let rows: Vec<[String; 7]> = records
        .iter()
        .map(|r| {
            [
                &r.student_id,
                &r.full_name,
                &r.gender,
                &r.gmail,
                &r.program,
                &r.year_level,
                &r.university,
            ]
            .map(ToString::to_string)
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 7]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", format_row(HEADERS));
    println!("{}", widths.map(|w| "-".repeat(w)).join("  "));
    for row in &rows {
        println!("{}", format_row(row.each_ref().map(String::as_str)));
    }
    println!();
    println!("{} student(s)", rows.len());
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!(
                    "  Listen address:     {}:{}",
                    config.server.host, config.server.port
                );
                println!("  CORS enabled:       {}", config.server.cors_enabled);
                println!("  Max body bytes:     {}", config.server.max_body_bytes);
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!();
                println!("[Validation]");
                println!("  Strict:             {}", config.validation.strict);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("invalid configuration in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
