//! conq-sim: headless fleet simulation driver.
//!
//! Registers units at seeded random positions, plans the group strategy (again every
//! `--replan-every` ticks), runs the requested number of ticks and prints a JSON summary to
//! stdout. Logs go to stderr.

mod scenario;
mod sim;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use conq_fleet::MovementMode;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "conq-sim")]
#[command(about = "Deterministic unit AI fleet simulation", version)]
struct Cli {
    /// Scenario file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of units to spawn
    #[arg(short, long)]
    units: Option<usize>,

    /// Number of ticks to run
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Seed for spawn positions and random targets
    #[arg(short, long)]
    seed: Option<u64>,

    /// Move along grid routes instead of straight lines
    #[arg(long)]
    follow_path: bool,

    /// Re-run the group strategy every N ticks (0 plans only once)
    #[arg(long, value_name = "N")]
    replan_every: Option<u64>,

    /// Pretty-print the summary
    #[arg(long)]
    pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, scenario: &mut Scenario) {
        if let Some(units) = self.units {
            scenario.units = units;
        }
        if let Some(ticks) = self.ticks {
            scenario.ticks = ticks;
        }
        if let Some(seed) = self.seed {
            scenario.fleet.seed = seed;
        }
        if self.follow_path {
            scenario.fleet.movement = MovementMode::FollowPath;
        }
        if let Some(every) = self.replan_every {
            scenario.replan_every = Some(every);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut scenario = match &cli.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    cli.apply(&mut scenario);

    let summary = sim::run(&scenario)?;
    let json = if cli.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_scenario_fields() {
        let cli = Cli::parse_from([
            "conq-sim",
            "--units",
            "3",
            "--ticks",
            "7",
            "--seed",
            "42",
            "--follow-path",
            "--replan-every",
            "0",
        ]);
        let mut scenario = Scenario::default();
        cli.apply(&mut scenario);

        assert_eq!(scenario.units, 3);
        assert_eq!(scenario.ticks, 7);
        assert_eq!(scenario.fleet.seed, 42);
        assert_eq!(scenario.fleet.movement, MovementMode::FollowPath);
        assert_eq!(scenario.replan_every, Some(0));
        assert!(!scenario.replans_at(10));
    }
}
