#![cfg(feature = "serde")]

use conq_core::Vec2;
use conq_fleet::{FleetConfig, MovementMode, UnitState, DEFAULT_APPROACH_RATE};

#[test]
fn partial_config_fills_defaults() {
    let cfg: FleetConfig =
        serde_json::from_str(r#"{"movement":"follow_path","cells_per_tick":2,"seed":11}"#).unwrap();

    assert_eq!(cfg.movement, MovementMode::FollowPath);
    assert_eq!(cfg.cells_per_tick, 2);
    assert_eq!(cfg.seed, 11);
    assert_eq!(cfg.approach_rate, DEFAULT_APPROACH_RATE);
    assert_eq!(cfg.bounds.max, Vec2::new(100.0, 100.0));
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn unit_state_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&UnitState::Moving).unwrap(), r#""moving""#);
    assert_eq!(UnitState::Idle.to_string(), "idle");
}
