use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use conq_fleet::{AiManager, FleetConfig, MovementMode};
use conq_nav::{Grid, GridCell, Pathfinder};

fn populated(config: FleetConfig, units: usize) -> AiManager {
    let mut m = if config.movement == MovementMode::FollowPath {
        let mut grid = Grid::open(100, 100).unwrap();
        for x in 10..90 {
            grid.set_blocked(GridCell::new(x, 50), true);
        }
        AiManager::with_navigator(config, Arc::new(Pathfinder::new(grid))).unwrap()
    } else {
        AiManager::new(config).unwrap()
    };
    for i in 0..units {
        m.register_unit(((i % 100) as f32, (i / 100) as f32));
    }
    m.plan_group_strategy();
    m
}

fn bench_fleet_update(c: &mut Criterion) {
    c.bench_function("fleet_update_interpolate_1000", |b| {
        let mut m = populated(FleetConfig::default(), 1000);
        b.iter(|| {
            m.update();
            black_box(m.tick());
        })
    });

    c.bench_function("fleet_plan_and_update_follow_path_200", |b| {
        let config = FleetConfig {
            movement: MovementMode::FollowPath,
            ..FleetConfig::default()
        };
        b.iter(|| {
            let mut m = populated(config.clone(), 200);
            for _ in 0..10 {
                m.update();
            }
            black_box(m.len());
        })
    });
}

criterion_group!(benches, bench_fleet_update);
criterion_main!(benches);
