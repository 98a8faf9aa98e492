use conq_bt::{Action, BehaviorTree, Condition, Selector, Sequence};

use crate::movement::Locomotion;
use crate::unit::{UnitBody, UnitState};

pub const ROOT_SELECTOR: &str = "RootSelector";
pub const MOVE_SEQUENCE: &str = "MoveSequence";
pub const HAS_TARGET: &str = "HasTargetCondition";
pub const MOVE_ACTION: &str = "MoveAction";
pub const IDLE_ACTION: &str = "IdleAction";

/// The standard unit tree:
///
/// ```text
/// RootSelector
/// ├── MoveSequence
/// │   ├── HasTargetCondition
/// │   └── MoveAction
/// └── IdleAction
/// ```
///
/// Each unit gets its own tree instance; nothing is shared between units except the
/// locomotion's navigator.
pub fn unit_tree(locomotion: Locomotion) -> BehaviorTree<UnitBody> {
    let move_sequence = Sequence::new(MOVE_SEQUENCE, Vec::new())
        .with_child(Condition::new(HAS_TARGET, |unit: &UnitBody| unit.has_target()))
        .with_child(Action::new(MOVE_ACTION, move |unit: &mut UnitBody| {
            locomotion.step(unit)
        }));

    let root = Selector::new(ROOT_SELECTOR, Vec::new())
        .with_child(move_sequence)
        .with_child(Action::new(IDLE_ACTION, idle));

    BehaviorTree::new(root)
}

fn idle(unit: &mut UnitBody) -> bool {
    unit.state = UnitState::Idle;
    true
}
