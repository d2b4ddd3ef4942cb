//! slabcast - 2D ray-vs-rectangle slab casting
//!
//! Command-line front end: single casts and scripted scenario replays.

mod config;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::CastConfig;
use scenario::Scenario;
use serde::Serialize;
use slabcast_geometry::{parse_vec2, Contact, FRect, IRect, NegativeTime, Ray, Vec2};
use slabcast_testkit::JsonlSink;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ray-vs-rectangle slab casting", long_about = None)]
struct Cli {
    /// TOML config file (default: config/slabcast.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report contacts for rays that start inside a rectangle
    #[arg(long, global = true)]
    accept_negative_time: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast one ray against one rectangle and print the contact as JSON
    Cast {
        /// Ray origin as `x,y`
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        origin: Vec2,

        /// Ray direction as `x,y` (the segment ends at origin + dir)
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        dir: Vec2,

        /// Rectangle as `x,y,w,h`
        #[arg(long, allow_hyphen_values = true)]
        rect: String,

        /// Parse the rectangle as integers
        #[arg(long)]
        int: bool,
    },
    /// Replay a JSON scenario file
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Write one JSON line per step to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Write the effective config as TOML
    InitConfig {
        /// Destination file
        #[arg(default_value = config::DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct CastOutput {
    hit: bool,
    contact: Option<Contact>,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    frames: usize,
    hits: usize,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting slabcast v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config.as_deref() {
        Some(path) => CastConfig::load_from_path(path),
        None => CastConfig::load(),
    };
    if cli.accept_negative_time {
        config.negative_time = NegativeTime::Accept;
    }

    match cli.command {
        Command::Cast {
            origin,
            dir,
            rect,
            int,
        } => cast(&config, Ray::new(origin, dir), &rect, int),
        Command::Run { scenario, log } => run(&config, &scenario, log.as_deref()),
        Command::InitConfig { path } => {
            config
                .save_to_path(&path)
                .with_context(|| format!("failed to write config to {}", path.display()))?;
            info!("Wrote config to {}", path.display());
            Ok(())
        }
    }
}

fn cast(config: &CastConfig, ray: Ray, rect: &str, int: bool) -> Result<()> {
    let options = config.cast_options();
    let contact = if int {
        let rect: IRect = rect
            .parse()
            .with_context(|| format!("invalid integer rect {rect:?}"))?;
        ray.intersect_rect_with(&rect, &options)
    } else {
        let rect: FRect = rect
            .parse()
            .with_context(|| format!("invalid rect {rect:?}"))?;
        ray.intersect_rect_with(&rect, &options)
    };

    let output = CastOutput {
        hit: contact.is_some(),
        contact,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(config: &CastConfig, path: &Path, log: Option<&Path>) -> Result<()> {
    let scenario = Scenario::from_path(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    info!(
        rects = scenario.rects().len(),
        "Replaying scenario {}",
        path.display()
    );
    let frames = scenario.run(&config.cast_options(), config.anchor());

    if let Some(log_path) = log {
        let mut sink = JsonlSink::create(log_path)?;
        for frame in &frames {
            sink.write(frame)?;
        }
        let lines = sink.finish()?;
        info!(lines, "Wrote scenario log to {}", log_path.display());
    }

    let summary = RunSummary {
        frames: frames.len(),
        hits: frames.iter().filter(|f| f.record.contact.is_some()).count(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
