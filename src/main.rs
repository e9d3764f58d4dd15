use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use warehouse_sim::simulation::{self, ScenarioConfig};

#[derive(Parser)]
#[command(name = "warehouse_sim")]
#[command(about = "Warehouse logistics simulation: process duration, AGV usage and energy")]
struct Cli {
    /// JSON scenario file (defaults to the built-in demonstration scenario)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override an AGV's current speed, e.g. --speed AGV-A=1.5 (repeatable)
    #[arg(long = "speed", value_name = "ID=MPS")]
    speeds: Vec<String>,

    /// Reject scenarios with non-positive or above-maximum AGV speeds, or with
    /// negative distances, durations or power draw (speed overrides included)
    #[arg(long)]
    strict: bool,

    /// Print a JSON summary instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match &cli.scenario {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            ScenarioConfig::from_path(path)?
        }
        None => {
            info!("Using built-in demonstration scenario");
            ScenarioConfig::demo()
        }
    };

    for spec in &cli.speeds {
        config.apply_speed_override(spec)?;
    }
    let scenario = config.build(cli.strict)?;

    if cli.json {
        let json = simulation::json_summary(&scenario.batch)
            .context("Failed to serialize summary")?;
        println!("{}", json);
    } else {
        print!("{}", simulation::full_report(&scenario.batch));
    }

    info!(
        "Simulated {} processes with {} AGVs",
        scenario.batch.len(),
        scenario.agvs.len()
    );
    Ok(())
}
