use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use conq_core::Vec2;
use conq_fleet::{AiManager, Bounds, FleetConfig, MovementMode, RallyPoint};
use conq_nav::{Grid, GridCell, Pathfinder};

pub const DEFAULT_UNITS: usize = 10;
pub const DEFAULT_TICKS: u64 = 100;
pub const DEFAULT_CELL_SIZE: f32 = 5.0;
pub const DEFAULT_REPLAN_EVERY: u64 = 10;

/// A simulation run as read from YAML.
///
/// Every field is optional; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub fleet: FleetConfig,
    pub units: usize,
    pub ticks: u64,
    /// Navigation grid for path-following movement. Falls back to [`default_grid`].
    pub grid: Option<Grid>,
    /// World units per grid cell.
    pub cell_size: f32,
    /// Send every unit to this point instead of random targets.
    pub rally: Option<Vec2>,
    /// Re-run the group strategy every N ticks. `None` or 0 plans only before the first tick.
    pub replan_every: Option<u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            fleet: FleetConfig::default(),
            units: DEFAULT_UNITS,
            ticks: DEFAULT_TICKS,
            grid: None,
            cell_size: DEFAULT_CELL_SIZE,
            rally: None,
            replan_every: Some(DEFAULT_REPLAN_EVERY),
        }
    }
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: Self = serde_yaml::from_str(content)?;
        Ok(scenario)
    }

    pub fn navigator(&self) -> Result<Pathfinder> {
        let grid = match &self.grid {
            Some(grid) => grid.clone(),
            None => default_grid()?,
        };
        Ok(Pathfinder::new(grid).with_cell_size(self.cell_size)?)
    }

    /// Whether the group strategy runs again before update number `tick`.
    ///
    /// The initial plan happens before tick 0 regardless.
    pub fn replans_at(&self, tick: u64) -> bool {
        matches!(self.replan_every, Some(n) if n > 0 && tick > 0 && tick % n == 0)
    }

    /// Builds the manager the scenario describes.
    ///
    /// With path following, `fleet.bounds` is shrunk to the grid so spawns and random targets
    /// always land on a cell; the manager's config carries the fitted bounds.
    pub fn build_manager(&self) -> Result<AiManager> {
        let manager = match self.fleet.movement {
            MovementMode::Interpolate => AiManager::new(self.fleet.clone())?,
            MovementMode::FollowPath => {
                self.fleet.validate()?;
                let navigator = self.navigator()?;
                let mut fleet = self.fleet.clone();
                fleet.bounds = fit_to_grid(fleet.bounds, &navigator)?;
                if let Some(point) = self.rally {
                    if navigator.world_to_cell(point).is_none() {
                        bail!(
                            "rally point ({}, {}) is outside the navigation grid",
                            point.x,
                            point.y
                        );
                    }
                }
                AiManager::with_navigator(fleet, Arc::new(navigator))?
            }
        };
        Ok(match self.rally {
            Some(point) => manager.with_strategy(RallyPoint::new(point)),
            None => manager,
        })
    }
}

fn fit_to_grid(bounds: Bounds, navigator: &Pathfinder) -> Result<Bounds> {
    let (lo, hi) = navigator.world_extent();
    let fitted = Bounds::new(
        Vec2::new(bounds.min.x.max(lo.x), bounds.min.y.max(lo.y)),
        Vec2::new(bounds.max.x.min(hi.x), bounds.max.y.min(hi.y)),
    );
    if !fitted.is_valid() {
        bail!(
            "bounds {:?}..{:?} do not overlap the navigation grid {:?}..{:?}",
            bounds.min,
            bounds.max,
            lo,
            hi
        );
    }
    if fitted != bounds {
        warn!(
            min_x = fitted.min.x,
            min_y = fitted.min.y,
            max_x = fitted.max.x,
            max_y = fitted.max.y,
            "bounds shrunk to the navigation grid"
        );
    }
    Ok(fitted)
}

/// 20x20 open field with a wall across row 10, columns 5 through 14.
pub fn default_grid() -> Result<Grid> {
    let mut grid = Grid::open(20, 20)?;
    for x in 5..=14 {
        grid.set_blocked(GridCell::new(x, 10), true);
    }
    Ok(grid)
}
