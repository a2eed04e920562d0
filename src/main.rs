//! Airlock simulator: main entry point
//!
//! Assembles an airlock from a JSON configuration, drives it through a
//! transit procedure and/or a list of single commands, and prints the
//! final status as JSON.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI (clap) · config file (serde_json) · env_logger      │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │  AirlockService ─▶ AirLock ─▶ Door · Sensor    │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                       │                                  │
//! │                       ▼                                  │
//! │                 LogEventSink                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Example, passing from the exterior into the cabin:
//!
//! ```text
//! RUST_LOG=debug airlock-sim --procedure ingress
//! airlock-sim --config habitat.json --step toggle_operation_mode --step open_outer_door
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use airlock::adapters::log_sink::LogEventSink;
use airlock::app::commands::{AirlockCommand, Procedure};
use airlock::app::service::AirlockService;
use airlock::assemble;
use airlock::config::AirlockConfig;

/// Drive a simulated two-door airlock.
#[derive(Parser)]
#[command(name = "airlock-sim", version)]
struct Cli {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transit procedure to run first: ingress or egress
    #[arg(short, long)]
    procedure: Option<Procedure>,

    /// Command to run after the procedure; repeatable
    #[arg(short, long = "step")]
    steps: Vec<AirlockCommand>,

    /// Continue with the next step after a rejected command
    #[arg(short, long)]
    keep_going: bool,
}

fn load_config(path: &Path) -> Result<AirlockConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AirlockConfig::default(),
    };
    info!("Config: {:?}", config);

    let airlock = assemble(&config).context("assembling airlock")?;
    let mut service = AirlockService::new(airlock);
    let mut sink = LogEventSink::new();
    service.start(&mut sink);

    if let Some(procedure) = cli.procedure {
        service
            .run_procedure(procedure, &mut sink)
            .with_context(|| format!("{procedure} procedure aborted"))?;
    }

    let steps = service.run_steps(&cli.steps, cli.keep_going, &mut sink);

    info!(
        "{} commands handled, {} rejected",
        service.commands_handled(),
        service.commands_rejected()
    );
    println!("{}", serde_json::to_string_pretty(&service.status())?);

    steps?;
    Ok(())
}
