use std::collections::BTreeMap;

use conq_core::{TickContext, UnitId, Vec2};
use conq_fleet::{
    AiManager, Bounds, FleetConfig, GroupStrategy, RallyPoint, RandomTargets, UnitSnapshot,
};

fn fleet(seed: u64, units: usize) -> AiManager {
    let config = FleetConfig {
        seed,
        bounds: Bounds::new(Vec2::new(-10.0, 5.0), Vec2::new(10.0, 25.0)),
        ..FleetConfig::default()
    };
    let mut m = AiManager::new(config).unwrap().with_trace_log();
    for i in 0..units {
        m.register_unit((i as f32, 0.0));
    }
    m
}

fn targets(m: &AiManager) -> Vec<Option<Vec2>> {
    m.units().map(|u| u.target()).collect()
}

#[test]
fn random_targets_stay_in_bounds() {
    let mut m = fleet(7, 32);
    m.plan_group_strategy();

    let bounds = m.config().bounds;
    for t in targets(&m) {
        let t = t.expect("every unit gets a target");
        assert!(bounds.contains(t), "{t:?} outside {bounds:?}");
    }
    assert_eq!(m.trace_log().unwrap().count("fleet.target"), 32);
    assert_eq!(m.trace_log().unwrap().count("fleet.strategy"), 1);
}

#[test]
fn same_seed_gives_same_plan_and_run() {
    let mut a = fleet(99, 8);
    let mut b = fleet(99, 8);
    a.plan_group_strategy();
    b.plan_group_strategy();
    assert_eq!(targets(&a), targets(&b));

    for _ in 0..20 {
        a.update();
        b.update();
    }
    let pa: Vec<_> = a.units().map(|u| (u.position(), u.state())).collect();
    let pb: Vec<_> = b.units().map(|u| (u.position(), u.state())).collect();
    assert_eq!(pa, pb);
}

#[test]
fn different_seeds_diverge() {
    let mut a = fleet(1, 4);
    let mut b = fleet(2, 4);
    a.plan_group_strategy();
    b.plan_group_strategy();
    assert_ne!(targets(&a), targets(&b));
}

#[test]
fn rally_point_sends_everyone_to_one_place() {
    let mut m = fleet(0, 5).with_strategy(RallyPoint::new(Vec2::new(3.0, 3.0)));
    assert_eq!(m.strategy_name(), "rally_point");
    m.plan_group_strategy();

    assert!(targets(&m)
        .iter()
        .all(|t| *t == Some(Vec2::new(3.0, 3.0))));
}

struct FirstOnly;

impl GroupStrategy for FirstOnly {
    fn name(&self) -> &str {
        "first_only"
    }

    fn choose_targets(
        &mut self,
        _ctx: &TickContext,
        units: &[UnitSnapshot],
    ) -> BTreeMap<UnitId, Vec2> {
        let mut out = BTreeMap::new();
        if let Some(first) = units.first() {
            out.insert(first.id, Vec2::new(1.0, 1.0));
        }
        out.insert(UnitId(1000), Vec2::ZERO);
        out
    }
}

#[test]
fn unmapped_units_keep_their_targets() {
    let mut m = fleet(0, 3);
    m.assign_target_to_unit(UnitId(2), (9.0, 9.0)).unwrap();
    m.set_strategy(Box::new(FirstOnly));

    m.plan_group_strategy();

    assert_eq!(m.unit(UnitId(1)).unwrap().target(), Some(Vec2::new(1.0, 1.0)));
    assert_eq!(m.unit(UnitId(2)).unwrap().target(), Some(Vec2::new(9.0, 9.0)));
    assert_eq!(m.unit(UnitId(3)).unwrap().target(), None);
    assert_eq!(m.trace_log().unwrap().count("fleet.unknown_unit"), 1);
}

#[test]
fn strategy_sees_units_in_id_order() {
    let ctx = TickContext::new(0, 0);
    let snapshots: Vec<_> = fleet(0, 4).snapshots();
    let ids: Vec<_> = snapshots.iter().map(|s| s.id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let mut random = RandomTargets::new(Bounds::default(), 5);
    let picked = random.choose_targets(&ctx, &snapshots);
    assert_eq!(picked.len(), 4);
}
