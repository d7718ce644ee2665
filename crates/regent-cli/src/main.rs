//! Regent CLI.
//!
//! - `regent simulate <scenario.yaml>` - run the AI on a scenario map
//! - `regent config` - print the effective configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use regent_cli::{RegentConfig, Scenario, Summary};

#[derive(Parser)]
#[command(name = "regent")]
#[command(about = "Turn-based strategy AI driver", version)]
struct Cli {
    /// Directory holding regent.yaml
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the AI through a scenario
    Simulate {
        scenario: PathBuf,

        /// Turn limit (overrides max_turns)
        #[arg(long)]
        turns: Option<u64>,

        /// Game seed (overrides seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let logs = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let mut config = RegentConfig::load_from_dir(&dir)?;

    match cli.command {
        Commands::Simulate {
            scenario,
            turns,
            seed,
            json,
        } => {
            if let Some(turns) = turns {
                config.max_turns = turns;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            config.json |= json;
            simulate(&scenario, &config)
        }
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn simulate(path: &Path, config: &RegentConfig) -> Result<()> {
    let scenario = Scenario::load(path)?;
    tracing::info!(scenario = %path.display(), seed = config.seed, "Starting simulation");
    let summary = regent_cli::run(&scenario, config)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("Scenario: {}", summary.scenario);
    println!("Seed: {}", summary.seed);
    println!();
    println!("turn  proposed  executed  active  resolved");
    for r in &summary.reports {
        println!(
            "{:>4}  {:>8}  {:>8}  {:>6}  {:>8}",
            r.turn, r.orders_proposed, r.orders_executed, r.roots_active, r.roots_resolved
        );
    }
    println!();
    println!("Expeditions:");
    for a in &summary.arrivals {
        let state = match (a.arrived, a.at) {
            (true, _) => "arrived".to_string(),
            (false, Some((x, y))) => format!("stopped at ({x}, {y})"),
            (false, None) => "lost".to_string(),
        };
        println!("  {}: {}", a.unit, state);
    }
    if !summary.tasks.is_empty() {
        println!();
        println!("Unfinished tasks: {}", summary.tasks.len());
        for t in &summary.tasks {
            println!("  {} {} ({} nodes)", t.id, t.kind, t.node_count());
        }
    }
}
