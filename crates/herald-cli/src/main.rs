//! Herald - broadcast bus tooling

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use herald_cli::{read_events, replay, ReplaySummary};
use herald_config::{resolve_config, HeraldConfig, ResolvedConfig};
use herald_events::{AuthState, BroadcastBus, EventName};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

mod commands;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = resolve_config(cli.config.as_deref()).and_then(|resolved| {
        let config = resolved
            .as_ref()
            .map(|r| r.config.clone())
            .unwrap_or_default();
        let _ = herald_telemetry::try_init_subscriber(&config.telemetry);

        match &cli.command {
            Commands::Catalog { json } => run_catalog(*json),
            Commands::Replay { file, json } => run_replay(&config, file, *json),
            Commands::Config { path } => run_config(resolved.as_ref(), &config, *path),
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_catalog(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(EventName::ALL)?);
        return Ok(());
    }

    for name in EventName::ALL {
        println!("{}", name);
    }
    Ok(())
}

fn run_replay(config: &HeraldConfig, file: &Path, json: bool) -> anyhow::Result<()> {
    let events = if file == Path::new("-") {
        read_events(io::stdin().lock())?
    } else {
        let handle = File::open(file)
            .with_context(|| format!("Failed to open event log: {}", file.display()))?;
        read_events(BufReader::new(handle))?
    };

    let bus = BroadcastBus::with_settings(&config.bus);
    let summary = replay(&bus, events);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &ReplaySummary) {
    println!(
        "{} {}",
        "Replayed".cyan().bold(),
        format!("{} events", summary.events).yellow()
    );
    for (name, count) in &summary.by_name {
        println!("  {:<28} {}", name.as_str(), count);
    }

    println!("{}", "─".repeat(40).dimmed());
    match summary.auth {
        AuthState::Authenticated(id) => println!("{}: {}", "User".cyan(), id.to_string().green()),
        AuthState::Unauthenticated => println!("{}: {}", "User".cyan(), "unauthenticated".dimmed()),
    }

    if summary.connections.is_empty() {
        println!("{}: {}", "Connections".cyan(), "none".dimmed());
        return;
    }

    println!("{}:", "Connections".cyan());
    for (name, change) in &summary.connections {
        println!("  {:<20} {} (dc {})", name, change.status, change.dc_id);
    }
}

fn run_config(
    resolved: Option<&ResolvedConfig>,
    config: &HeraldConfig,
    path_only: bool,
) -> anyhow::Result<()> {
    if path_only {
        match resolved {
            Some(r) => println!("{}", r.path.display()),
            None => println!("{}", "(defaults, no config file found)".dimmed()),
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
