//! Fleet configuration.

use conq_core::{AiError, AiResult, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance below which a moving unit snaps onto its target.
pub const DEFAULT_ARRIVAL_THRESHOLD: f32 = 1.0;
/// Fraction of the remaining distance covered per tick by interpolated movement.
pub const DEFAULT_APPROACH_RATE: f32 = 0.1;
/// Grid cells advanced per tick by path-following movement.
pub const DEFAULT_CELLS_PER_TICK: u32 = 1;
/// Upper corner of the default strategy bounding box (lower corner is the origin).
pub const DEFAULT_BOUNDS_EXTENT: f32 = 100.0;

/// Axis-aligned box that strategies draw targets from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(DEFAULT_BOUNDS_EXTENT, DEFAULT_BOUNDS_EXTENT),
        }
    }
}

/// How the "move toward target" action advances a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementMode {
    /// Straight-line exponential approach.
    #[default]
    Interpolate,
    /// Follow a grid route from the pathfinder.
    FollowPath,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    pub arrival_threshold: f32,
    pub approach_rate: f32,
    pub cells_per_tick: u32,
    pub bounds: Bounds,
    /// Seed for the default random strategy and the tick context.
    pub seed: u64,
    pub movement: MovementMode,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
            approach_rate: DEFAULT_APPROACH_RATE,
            cells_per_tick: DEFAULT_CELLS_PER_TICK,
            bounds: Bounds::default(),
            seed: 0,
            movement: MovementMode::default(),
        }
    }
}

impl FleetConfig {
    pub fn validate(&self) -> AiResult<()> {
        if !(self.arrival_threshold > 0.0) || !self.arrival_threshold.is_finite() {
            return Err(AiError::InvalidConfig(format!(
                "arrival_threshold must be a positive number, got {}",
                self.arrival_threshold
            )));
        }
        if !(self.approach_rate > 0.0 && self.approach_rate <= 1.0) {
            return Err(AiError::InvalidConfig(format!(
                "approach_rate must be in (0, 1], got {}",
                self.approach_rate
            )));
        }
        if self.cells_per_tick == 0 {
            return Err(AiError::InvalidConfig(
                "cells_per_tick must be at least 1".to_string(),
            ));
        }
        if !self.bounds.is_valid() {
            return Err(AiError::InvalidConfig(format!(
                "bounds min {:?} exceeds max {:?}",
                self.bounds.min, self.bounds.max
            )));
        }
        Ok(())
    }
}
