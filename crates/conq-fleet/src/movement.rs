//! Movement strategies behind the "move toward target" leaf.

use core::fmt;
use std::sync::Arc;

use conq_core::{AiError, AiResult, Vec2};
use conq_nav::Navigator;
use tracing::{debug, warn};

use crate::config::{FleetConfig, MovementMode, DEFAULT_APPROACH_RATE, DEFAULT_ARRIVAL_THRESHOLD};
use crate::unit::{UnitBody, UnitState};

pub type SharedNavigator = Arc<dyn Navigator + Send + Sync>;

/// How a unit with a target advances on one update.
#[derive(Clone)]
pub enum Locomotion {
    /// Cover `approach_rate` of the remaining distance each tick; snap to the target once
    /// closer than `arrival_threshold`.
    Interpolate {
        approach_rate: f32,
        arrival_threshold: f32,
    },
    /// Plan a grid route on the first move tick, then step `cells_per_tick` waypoints per tick.
    FollowPath {
        navigator: SharedNavigator,
        cells_per_tick: u32,
        arrival_threshold: f32,
    },
}

impl Default for Locomotion {
    fn default() -> Self {
        Locomotion::Interpolate {
            approach_rate: DEFAULT_APPROACH_RATE,
            arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
        }
    }
}

impl fmt::Debug for Locomotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locomotion::Interpolate {
                approach_rate,
                arrival_threshold,
            } => f
                .debug_struct("Interpolate")
                .field("approach_rate", approach_rate)
                .field("arrival_threshold", arrival_threshold)
                .finish(),
            Locomotion::FollowPath {
                cells_per_tick,
                arrival_threshold,
                ..
            } => f
                .debug_struct("FollowPath")
                .field("cells_per_tick", cells_per_tick)
                .field("arrival_threshold", arrival_threshold)
                .finish_non_exhaustive(),
        }
    }
}

impl Locomotion {
    pub fn follow_path(navigator: SharedNavigator) -> Self {
        Locomotion::FollowPath {
            navigator,
            cells_per_tick: 1,
            arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
        }
    }

    /// Builds the strategy named by `config.movement`.
    ///
    /// Path following needs a navigator; asking for it without one is a config error.
    pub fn from_config(config: &FleetConfig, navigator: Option<SharedNavigator>) -> AiResult<Self> {
        match config.movement {
            MovementMode::Interpolate => Ok(Locomotion::Interpolate {
                approach_rate: config.approach_rate,
                arrival_threshold: config.arrival_threshold,
            }),
            MovementMode::FollowPath => {
                let navigator = navigator.ok_or_else(|| {
                    AiError::InvalidConfig("follow_path movement needs a navigation grid".into())
                })?;
                Ok(Locomotion::FollowPath {
                    navigator,
                    cells_per_tick: config.cells_per_tick,
                    arrival_threshold: config.arrival_threshold,
                })
            }
        }
    }

    pub fn arrival_threshold(&self) -> f32 {
        match self {
            Locomotion::Interpolate {
                arrival_threshold, ..
            }
            | Locomotion::FollowPath {
                arrival_threshold, ..
            } => *arrival_threshold,
        }
    }

    /// Advances `unit` one tick toward its target.
    ///
    /// Fails only when there is no target, or when path following cannot route to it (the
    /// target is then dropped).
    pub fn step(&self, unit: &mut UnitBody) -> bool {
        let Some(target) = unit.target else {
            return false;
        };
        match self {
            Locomotion::Interpolate {
                approach_rate,
                arrival_threshold,
            } => interpolate(unit, target, *approach_rate, *arrival_threshold),
            Locomotion::FollowPath {
                navigator,
                cells_per_tick,
                arrival_threshold,
            } => follow_path(
                unit,
                target,
                navigator.as_ref(),
                *cells_per_tick,
                *arrival_threshold,
            ),
        }
    }
}

fn interpolate(unit: &mut UnitBody, target: Vec2, rate: f32, threshold: f32) -> bool {
    unit.position = unit.position.lerp(target, rate);
    if unit.position.distance(target) < threshold {
        unit.arrive(target);
        debug!(unit = %unit.id, x = target.x, y = target.y, "arrived");
    }
    unit.state = UnitState::Moving;
    true
}

fn follow_path(
    unit: &mut UnitBody,
    target: Vec2,
    navigator: &(dyn Navigator + Send + Sync),
    cells_per_tick: u32,
    threshold: f32,
) -> bool {
    if unit.waypoints.is_empty() {
        if unit.position.distance(target) < threshold {
            unit.arrive(target);
            unit.state = UnitState::Moving;
            debug!(unit = %unit.id, "arrived without routing");
            return true;
        }
        let Some(route) = navigator.find_route(unit.position, target) else {
            warn!(unit = %unit.id, x = target.x, y = target.y, "no route to target; dropping it");
            unit.target = None;
            unit.clear_route();
            return false;
        };
        debug!(unit = %unit.id, steps = route.steps(), "route planned");
        unit.path = route.cells;
        unit.waypoints = route.points;
        // The first waypoint is the unit's own position.
        unit.next_waypoint = 1;
    }

    for _ in 0..cells_per_tick.max(1) {
        let Some(next) = unit.waypoints.get(unit.next_waypoint) else {
            break;
        };
        unit.position = *next;
        unit.next_waypoint += 1;
    }

    if unit.next_waypoint >= unit.waypoints.len() {
        unit.arrive(target);
        debug!(unit = %unit.id, x = target.x, y = target.y, "arrived");
    }
    unit.state = UnitState::Moving;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use conq_core::UnitId;
    use conq_nav::{Grid, Pathfinder};

    #[test]
    fn interpolate_covers_a_tenth_of_the_gap() {
        let mut body = UnitBody::new(UnitId(1), Vec2::ZERO);
        body.set_target(Vec2::new(10.0, 0.0));

        assert!(Locomotion::default().step(&mut body));
        assert!((body.position.x - 1.0).abs() < 1e-6);
        assert_eq!(body.state, UnitState::Moving);
    }

    #[test]
    fn no_target_fails_without_touching_state() {
        let mut body = UnitBody::new(UnitId(1), Vec2::new(3.0, 4.0));
        assert!(!Locomotion::default().step(&mut body));
        assert_eq!(body.state, UnitState::Idle);
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn follow_path_without_navigator_is_rejected() {
        let config = FleetConfig {
            movement: MovementMode::FollowPath,
            ..FleetConfig::default()
        };
        assert!(matches!(
            Locomotion::from_config(&config, None),
            Err(AiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unroutable_target_is_dropped() {
        let nav: SharedNavigator = Arc::new(Pathfinder::new(Grid::open(4, 4).unwrap()));
        let mut body = UnitBody::new(UnitId(1), Vec2::ZERO);
        body.set_target(Vec2::new(50.0, 50.0));

        assert!(!Locomotion::follow_path(nav).step(&mut body));
        assert_eq!(body.target, None);
        assert_eq!(body.position, Vec2::ZERO);
        assert!(body.path.is_empty());
    }
}
