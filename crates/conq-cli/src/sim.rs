use anyhow::Result;
use serde::Serialize;
use tracing::info;

use conq_core::rng::derive_seed;
use conq_core::{DeterministicRng, SplitMix64, UnitId, Vec2};
use conq_fleet::{AiManager, UnitState};

use crate::scenario::Scenario;

/// RNG stream used for spawn positions, kept apart from the strategy's stream.
const SPAWN_STREAM: u64 = 0x5350_4157_4e;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSummary {
    pub id: UnitId,
    pub position: Vec2,
    pub state: UnitState,
    pub target: Option<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub tick: u64,
    pub strategy: String,
    pub idle: usize,
    pub moving: usize,
    pub units: Vec<UnitSummary>,
}

impl Summary {
    pub fn of(manager: &AiManager) -> Self {
        let units: Vec<_> = manager
            .units()
            .map(|u| UnitSummary {
                id: u.id(),
                position: u.position(),
                state: u.state(),
                target: u.target(),
            })
            .collect();
        let idle = units.iter().filter(|u| u.state == UnitState::Idle).count();
        Self {
            tick: manager.tick(),
            strategy: manager.strategy_name().to_string(),
            idle,
            moving: units.len() - idle,
            units,
        }
    }
}

/// Spawns the units inside the manager's bounds, plans, and runs every tick, replanning on
/// the scenario's cadence.
pub fn run(scenario: &Scenario) -> Result<Summary> {
    let mut manager = scenario.build_manager()?;
    let bounds = manager.config().bounds;
    let mut rng = SplitMix64::new(derive_seed(scenario.fleet.seed, 0, SPAWN_STREAM));

    for _ in 0..scenario.units {
        let x = rng.next_f32_range(bounds.min.x, bounds.max.x);
        let y = rng.next_f32_range(bounds.min.y, bounds.max.y);
        manager.register_unit(Vec2::new(x, y));
    }

    info!(
        units = manager.len(),
        ticks = scenario.ticks,
        movement = ?scenario.fleet.movement,
        replan_every = ?scenario.replan_every,
        "simulation starting"
    );
    manager.plan_group_strategy();
    for _ in 0..scenario.ticks {
        if scenario.replans_at(manager.tick()) {
            manager.plan_group_strategy();
        }
        manager.update();
    }

    let summary = Summary::of(&manager);
    info!(idle = summary.idle, moving = summary.moving, "simulation finished");
    Ok(summary)
}
