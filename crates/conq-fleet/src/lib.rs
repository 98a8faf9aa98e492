//! Per-unit behavior-tree controllers and the fleet orchestrator that owns them.
//!
//! Each registered unit carries a small tree (move toward a target if it has one, otherwise
//! idle). [`AiManager`] allocates ids, routes targets, runs group strategies and updates every
//! unit once per tick in ascending id order.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod config;
pub mod manager;
pub mod movement;
pub mod strategy;
pub mod unit;

pub use behavior::unit_tree;
pub use config::{
    Bounds, FleetConfig, MovementMode, DEFAULT_APPROACH_RATE, DEFAULT_ARRIVAL_THRESHOLD,
    DEFAULT_CELLS_PER_TICK,
};
pub use manager::AiManager;
pub use movement::{Locomotion, SharedNavigator};
pub use strategy::{GroupStrategy, RallyPoint, RandomTargets, UnitSnapshot};
pub use unit::{UnitAi, UnitBody, UnitState};
