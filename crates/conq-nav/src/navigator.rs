use conq_core::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GridCell;

/// A planned world-space route.
///
/// `cells` is the grid route, start and goal inclusive. `points` are the matching waypoints:
/// `points[0]` is the requested start, `points.last()` the requested goal, and interior points are
/// cell positions. When start and goal share a cell, `cells` has one entry and `points` two.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub cells: Vec<GridCell>,
    pub points: Vec<Vec2>,
}

impl NavPath {
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

pub trait Navigator {
    /// Route between two world points, or `None` when there is no route (including endpoints
    /// outside the navigable area).
    fn find_route(&self, from: Vec2, to: Vec2) -> Option<NavPath>;
}
