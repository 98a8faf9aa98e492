//! Grid navigation primitives: walkability grids, A* pathfinding, and world-space routes.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod grid;
pub mod navigator;

pub use astar::Pathfinder;
pub use grid::{Grid, GridCell};
pub use navigator::{NavPath, Navigator};
