//! Group-level target assignment.

use std::collections::BTreeMap;

use conq_core::{DeterministicRng, SplitMix64, TickContext, UnitId, Vec2};

use crate::config::Bounds;
use crate::unit::{UnitAi, UnitState};

/// Read-only view of one unit handed to a [`GroupStrategy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub position: Vec2,
    pub target: Option<Vec2>,
    pub state: UnitState,
}

impl From<&UnitAi> for UnitSnapshot {
    fn from(unit: &UnitAi) -> Self {
        Self {
            id: unit.id(),
            position: unit.position(),
            target: unit.target(),
            state: unit.state(),
        }
    }
}

/// Chooses new targets for some or all units.
///
/// Units are passed in ascending id order. Units missing from the returned map keep their
/// current target.
pub trait GroupStrategy: 'static {
    fn name(&self) -> &str;

    fn choose_targets(
        &mut self,
        ctx: &TickContext,
        units: &[UnitSnapshot],
    ) -> BTreeMap<UnitId, Vec2>;
}

/// Uniformly random targets inside `bounds`, from a seeded generator.
///
/// Two instances with the same seed produce the same assignments for the same unit list.
#[derive(Debug, Clone)]
pub struct RandomTargets {
    bounds: Bounds,
    rng: SplitMix64,
}

impl RandomTargets {
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        Self {
            bounds,
            rng: SplitMix64::new(seed),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl GroupStrategy for RandomTargets {
    fn name(&self) -> &str {
        "random_targets"
    }

    fn choose_targets(
        &mut self,
        _ctx: &TickContext,
        units: &[UnitSnapshot],
    ) -> BTreeMap<UnitId, Vec2> {
        let Bounds { min, max } = self.bounds;
        units
            .iter()
            .map(|u| {
                let x = self.rng.next_f32_range(min.x, max.x);
                let y = self.rng.next_f32_range(min.y, max.y);
                (u.id, Vec2::new(x, y))
            })
            .collect()
    }
}

/// Sends every unit to one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RallyPoint {
    pub point: Vec2,
}

impl RallyPoint {
    pub fn new(point: Vec2) -> Self {
        Self { point }
    }
}

impl GroupStrategy for RallyPoint {
    fn name(&self) -> &str {
        "rally_point"
    }

    fn choose_targets(
        &mut self,
        _ctx: &TickContext,
        units: &[UnitSnapshot],
    ) -> BTreeMap<UnitId, Vec2> {
        units.iter().map(|u| (u.id, self.point)).collect()
    }
}
