//! Courtrace Command Line Tool
//!
//! Provides commands for the booking race and its supporting arithmetic:
//! - run: race the configured candidates for the target slot
//! - sign: compute a commit checksum
//! - times: show the derived booking date and slot start
//!
//! Exit codes for `run`: 0 when a candidate committed, 1 when every
//! candidate failed, 2 on configuration errors — so an external scheduler
//! can alert on total failure.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use courtrace_core::{time, Credentials, RaceConfig, SECRET_ENV};
use courtrace_race::{run_race_http, RaceOutcome};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "courtrace")]
#[command(version)]
#[command(about = "Race concurrent booking flows for a contended facility slot")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the booking race
    #[command(about = "Race every configured candidate; first accepted commit wins")]
    Run {
        /// Path to the JSON config file
        #[arg(long, short, value_name = "FILE")]
        config: PathBuf,

        /// Print the derived plan without issuing any call
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute a commit checksum
    #[command(about = "Compute the commit digest for the given payload fields")]
    Sign {
        #[arg(long)]
        utility_id: i64,

        #[arg(long)]
        place_id: i64,

        #[arg(long)]
        booking_date: i64,

        #[arg(long)]
        time_constraint_id: i64,
    },

    /// Show derived timestamps
    #[command(about = "Show the derived booking date and slot start")]
    Times {
        /// Epoch milliseconds to derive from (defaults to the current time)
        #[arg(long, value_name = "EPOCH_MS")]
        at: Option<i64>,

        /// Target local hour of the slot
        #[arg(long, default_value_t = 18)]
        hour: u32,

        /// Local calendar days ahead
        #[arg(long, default_value_t = 1)]
        days_ahead: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("courtrace=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, dry_run } => handle_run(&config, dry_run).await,
        Commands::Sign {
            utility_id,
            place_id,
            booking_date,
            time_constraint_id,
        } => exit_on_error(handle_sign(
            utility_id,
            place_id,
            booking_date,
            time_constraint_id,
        )),
        Commands::Times {
            at,
            hour,
            days_ahead,
        } => exit_on_error(handle_times(at, hour, days_ahead)),
    }
}

/// Map helper-command errors to the configuration exit code.
fn exit_on_error(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(2)
        }
    }
}

async fn handle_run(path: &PathBuf, dry_run: bool) -> ExitCode {
    let config = match RaceConfig::load(path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Configuration error: {error}");
            return ExitCode::from(2);
        }
    };

    let now = Utc::now();
    let booking_date = time::booking_date(now);

    println!("Booking date: {}", render_instant(booking_date));
    if let Some(hour) = config.target_hour {
        if let Some(start) = time::slot_start(now, hour, config.days_ahead) {
            println!("Expected slot start: {}", render_instant(start));
        }
    }
    for candidate in &config.candidates {
        println!("Candidate: {candidate}");
    }

    if dry_run {
        println!("Dry run; no calls issued.");
        return ExitCode::SUCCESS;
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(error) => {
            eprintln!("Configuration error: {error}");
            return ExitCode::from(2);
        }
    };

    let outcome = run_race_http(&config, &credentials).await;

    for result in outcome.results() {
        match &result.outcome {
            Ok(confirmation) => println!(
                "{}: booked{}",
                result.candidate,
                confirmation
                    .message
                    .as_deref()
                    .map(|m| format!(" ({m})"))
                    .unwrap_or_default()
            ),
            Err(failure) => println!("{}: {failure}", result.candidate),
        }
    }

    match outcome {
        RaceOutcome::Won { winner, .. } => {
            println!("Race won by {}", winner.candidate);
            ExitCode::SUCCESS
        }
        RaceOutcome::AllFailed(_) => {
            eprintln!("No candidate committed a booking");
            ExitCode::from(1)
        }
    }
}

fn handle_sign(
    utility_id: i64,
    place_id: i64,
    booking_date: i64,
    time_constraint_id: i64,
) -> Result<()> {
    let secret = std::env::var(SECRET_ENV).with_context(|| format!("{SECRET_ENV} is not set"))?;

    let digest = courtrace_checksum::sign(
        utility_id,
        place_id,
        booking_date,
        time_constraint_id,
        &secret,
    );
    println!("{digest}");

    Ok(())
}

fn handle_times(at: Option<i64>, hour: u32, days_ahead: u32) -> Result<()> {
    let now: DateTime<Utc> = match at {
        Some(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .with_context(|| format!("{ms} is not a valid epoch-millisecond timestamp"))?,
        None => Utc::now(),
    };

    let booking_date = time::booking_date(now);
    let slot_start = time::slot_start(now, hour, days_ahead)
        .with_context(|| format!("{hour} is not a valid hour of day"))?;

    println!("booking date: {}", render_instant(booking_date));
    println!("slot start:   {}", render_instant(slot_start));

    Ok(())
}

fn render_instant(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(instant) => format!(
            "{ms} ({})",
            instant.with_timezone(&time::local_offset()).to_rfc3339()
        ),
        None => ms.to_string(),
    }
}
