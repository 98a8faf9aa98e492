use core::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use conq_core::{AiError, AiResult, Vec2};
use tracing::debug;

use crate::{Grid, GridCell, NavPath, Navigator};

#[derive(Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    cell: GridCell,
    tie: u64,
}

impl OpenNode {
    // Equal `f` falls back to the cell's (x, y) order, then to insertion order.
    fn key(&self) -> (u32, GridCell, u64) {
        (self.f, self.cell, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// A* over a shared, read-only [`Grid`].
///
/// 4-connected, unit edge cost, Manhattan heuristic: returned paths are cost-optimal. Holds no
/// mutable state, so one instance can serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    grid: Arc<Grid>,
    cell_size: f32,
}

impl Pathfinder {
    pub fn new(grid: impl Into<Arc<Grid>>) -> Self {
        Self {
            grid: grid.into(),
            cell_size: 1.0,
        }
    }

    /// World units per grid cell, used by the [`Navigator`] mapping.
    ///
    /// Fails with [`AiError::InvalidConfig`] unless `cell_size` is finite and > 0.
    pub fn with_cell_size(mut self, cell_size: f32) -> AiResult<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(AiError::InvalidConfig(format!(
                "cell_size must be finite and > 0, got {cell_size}"
            )));
        }
        self.cell_size = cell_size;
        Ok(self)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn heuristic(a: GridCell, b: GridCell) -> u32 {
        a.manhattan(b)
    }

    /// Shortest route from `start` to `goal`, both inclusive.
    ///
    /// Empty when no route exists or either endpoint is out of bounds. `start` itself is not
    /// checked for walkability; a blocked `goal` is unreachable unless it equals `start`.
    pub fn find_path(&self, start: GridCell, goal: GridCell) -> Vec<GridCell> {
        let grid = &*self.grid;
        let (Some(start_idx), Some(goal_idx)) = (grid.idx(start), grid.idx(goal)) else {
            debug!(?start, ?goal, "pathfinding endpoint out of bounds");
            return Vec::new();
        };

        let mut open = BinaryHeap::<OpenNode>::new();
        let mut tie: u64 = 0;

        let len = grid.cell_count();
        let mut g_score = vec![u32::MAX; len];
        let mut came_from: Vec<Option<usize>> = vec![None; len];

        g_score[start_idx] = 0;
        open.push(OpenNode {
            f: Self::heuristic(start, goal),
            g: 0,
            cell: start,
            tie,
        });
        tie += 1;

        let mut reached = false;
        while let Some(node) = open.pop() {
            if node.cell == goal {
                reached = true;
                break;
            }

            let Some(node_idx) = grid.idx(node.cell) else {
                continue;
            };
            if node.g != g_score[node_idx] {
                // Stale heap entry.
                continue;
            }

            for n in node.cell.neighbors() {
                let Some(n_idx) = grid.idx(n) else { continue };
                if grid.blocked_at(n_idx) {
                    continue;
                }

                let tentative_g = node.g.saturating_add(1);
                if tentative_g >= g_score[n_idx] {
                    continue;
                }

                came_from[n_idx] = Some(node_idx);
                g_score[n_idx] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g.saturating_add(Self::heuristic(n, goal)),
                    g: tentative_g,
                    cell: n,
                    tie,
                });
                tie += 1;
            }
        }

        if !reached {
            debug!(?start, ?goal, "no path");
            return Vec::new();
        }

        let path = self.reconstruct_path(&came_from, goal_idx);
        if path.first() != Some(&start) {
            debug!(?start, ?goal, "parent chain does not reach start");
            return Vec::new();
        }
        debug!(?start, ?goal, steps = path.len() - 1, "path found");
        path
    }

    /// Number of steps in `path` if it is a contiguous walk over walkable cells (the first
    /// cell is exempt from the walkability check).
    pub fn path_cost(&self, path: &[GridCell]) -> Option<u32> {
        let first = path.first()?;
        if !self.grid.in_bounds(*first) {
            return None;
        }
        for w in path.windows(2) {
            if w[0].manhattan(w[1]) != 1 || !self.grid.is_walkable(w[1]) {
                return None;
            }
        }
        Some((path.len() - 1) as u32)
    }

    /// Grid cell containing a world point (nearest cell origin), if in bounds.
    pub fn world_to_cell(&self, p: Vec2) -> Option<GridCell> {
        let cell = GridCell::new(
            (p.x / self.cell_size).round() as i32,
            (p.y / self.cell_size).round() as i32,
        );
        self.grid.in_bounds(cell).then_some(cell)
    }

    /// Origins of the first and last grid cells in world space.
    ///
    /// Every point inside this box maps to a cell through [`Pathfinder::world_to_cell`].
    pub fn world_extent(&self) -> (Vec2, Vec2) {
        let last = GridCell::new(
            self.grid.width() as i32 - 1,
            self.grid.height() as i32 - 1,
        );
        (Vec2::ZERO, self.cell_to_world(last))
    }

    pub fn cell_to_world(&self, cell: GridCell) -> Vec2 {
        Vec2::new(
            cell.x as f32 * self.cell_size,
            cell.y as f32 * self.cell_size,
        )
    }

    fn reconstruct_path(&self, came_from: &[Option<usize>], mut current: usize) -> Vec<GridCell> {
        let mut out = vec![self.grid.cell_from_idx(current)];
        while let Some(prev) = came_from[current] {
            current = prev;
            out.push(self.grid.cell_from_idx(current));
        }
        out.reverse();
        out
    }
}

impl Navigator for Pathfinder {
    fn find_route(&self, from: Vec2, to: Vec2) -> Option<NavPath> {
        let start = self.world_to_cell(from)?;
        let goal = self.world_to_cell(to)?;
        let cells = self.find_path(start, goal);
        if cells.is_empty() {
            return None;
        }

        // Preserve exact endpoints; interior waypoints sit on cell origins.
        let inner_len = cells.len().saturating_sub(2);
        let mut points = Vec::with_capacity(cells.len().max(2));
        points.push(from);
        for cell in cells.iter().skip(1).take(inner_len) {
            points.push(self.cell_to_world(*cell));
        }
        points.push(to);
        Some(NavPath { cells, points })
    }
}
