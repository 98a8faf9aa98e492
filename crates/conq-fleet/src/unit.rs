use core::fmt;

use conq_bt::{BehaviorTree, BtStatus};
use conq_core::{UnitId, Vec2};
use conq_nav::GridCell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::behavior::unit_tree;
use crate::movement::Locomotion;

/// Coarse activity label, rewritten by the behavior tree every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitState {
    #[default]
    Idle,
    Moving,
}

impl UnitState {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitState::Idle => "idle",
            UnitState::Moving => "moving",
        }
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutable state a unit's behavior tree reads and writes.
///
/// Leaves get this as their context. Outside the crate it is read-only apart from
/// [`UnitBody::set_target`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnitBody {
    pub(crate) id: UnitId,
    pub(crate) position: Vec2,
    pub(crate) target: Option<Vec2>,
    pub(crate) state: UnitState,
    pub(crate) path: Vec<GridCell>,
    pub(crate) waypoints: Vec<Vec2>,
    pub(crate) next_waypoint: usize,
}

impl UnitBody {
    pub fn new(id: UnitId, position: Vec2) -> Self {
        Self {
            id,
            position,
            target: None,
            state: UnitState::Idle,
            path: Vec::new(),
            waypoints: Vec::new(),
            next_waypoint: 0,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn state(&self) -> UnitState {
        self.state
    }

    /// Grid route currently being followed. Empty unless moving in path-following mode.
    pub fn path(&self) -> &[GridCell] {
        &self.path
    }

    /// Replaces any existing target and drops the planned route.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
        self.clear_route();
    }

    pub(crate) fn arrive(&mut self, target: Vec2) {
        self.position = target;
        self.target = None;
        self.clear_route();
    }

    pub(crate) fn clear_route(&mut self) {
        self.path.clear();
        self.waypoints.clear();
        self.next_waypoint = 0;
    }
}

/// One unit: its body plus the behavior tree that drives it.
pub struct UnitAi {
    body: UnitBody,
    tree: BehaviorTree<UnitBody>,
}

impl UnitAi {
    /// A unit at `position`, idle, with the standard move-or-idle tree.
    pub fn new(id: UnitId, position: Vec2, locomotion: Locomotion) -> Self {
        Self {
            body: UnitBody::new(id, position),
            tree: unit_tree(locomotion),
        }
    }

    /// A unit driven by a caller-supplied tree.
    pub fn with_tree(body: UnitBody, tree: BehaviorTree<UnitBody>) -> Self {
        Self { body, tree }
    }

    /// One evaluation of the behavior tree.
    pub fn update(&mut self) {
        self.tree.run(&mut self.body);
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.body.set_target(target);
    }

    pub fn reset_tree(&mut self) {
        self.tree.reset();
    }

    pub fn id(&self) -> UnitId {
        self.body.id
    }

    pub fn state(&self) -> UnitState {
        self.body.state
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn target(&self) -> Option<Vec2> {
        self.body.target
    }

    pub fn path(&self) -> &[GridCell] {
        &self.body.path
    }

    pub fn body(&self) -> &UnitBody {
        &self.body
    }

    pub fn last_status(&self) -> Option<BtStatus> {
        self.tree.last_status()
    }

    pub fn tree_name(&self) -> &str {
        self.tree.root_name()
    }
}

impl fmt::Debug for UnitAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitAi")
            .field("body", &self.body)
            .field("tree", &self.tree)
            .finish()
    }
}
