use std::sync::Arc;
use std::thread;

use conq_core::{AiError, Vec2};
use conq_nav::{Grid, GridCell, Navigator, Pathfinder};

fn cell(x: i32, y: i32) -> GridCell {
    GridCell::new(x, y)
}

fn assert_valid_walk(pf: &Pathfinder, path: &[GridCell]) {
    for w in path.windows(2) {
        assert_eq!(w[0].manhattan(w[1]), 1, "non-adjacent step {:?} -> {:?}", w[0], w[1]);
        assert!(pf.grid().is_walkable(w[1]), "{:?} is blocked", w[1]);
    }
}

#[test]
fn routes_around_blocked_middle_row() {
    let grid = Grid::from_rows(&[[0u8, 0, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]).unwrap();
    let pf = Pathfinder::new(grid);

    let path = pf.find_path(cell(0, 0), cell(3, 2));

    assert_eq!(path.first(), Some(&cell(0, 0)));
    assert_eq!(path.last(), Some(&cell(3, 2)));
    // Manhattan distance is 5 and either corridor around the blocked cells achieves it.
    assert_eq!(path.len(), 6);
    assert_eq!(pf.path_cost(&path), Some(5));
    assert!(!path.contains(&cell(1, 1)));
    assert!(!path.contains(&cell(2, 1)));
    assert_valid_walk(&pf, &path);
}

#[test]
fn finds_optimal_path_through_single_gap() {
    let mut grid = Grid::open(5, 5).unwrap();
    // Vertical wall at x = 2 with a gap at y = 2.
    for y in 0..5 {
        if y != 2 {
            grid.set_blocked(cell(2, y), true);
        }
    }
    let pf = Pathfinder::new(grid);

    let path = pf.find_path(cell(0, 0), cell(4, 4));

    assert!(path.contains(&cell(2, 2)));
    assert_eq!(pf.path_cost(&path), Some(8));
    assert_valid_walk(&pf, &path);
}

#[test]
fn detour_is_longer_than_manhattan_when_forced() {
    let grid = Grid::from_ascii(
        "
        .....
        .###.
        .#...
        .#.#.
        ...#.
        ",
    )
    .unwrap();
    let pf = Pathfinder::new(grid);

    // From inside the pocket at (2,3) to (4,4): straight line is blocked by the
    // wall at x = 3 rows 3..4, so the route climbs to row 2 first.
    let path = pf.find_path(cell(2, 3), cell(4, 4));
    assert_eq!(pf.path_cost(&path), Some(5));
    assert_valid_walk(&pf, &path);
}

#[test]
fn enclosed_start_has_no_path() {
    let grid = Grid::from_ascii(
        "
        .....
        ..#..
        .#.#.
        ..#..
        .....
        ",
    )
    .unwrap();
    let pf = Pathfinder::new(grid);

    assert!(pf.find_path(cell(2, 2), cell(0, 0)).is_empty());
    assert!(pf.find_path(cell(0, 0), cell(2, 2)).is_empty());
}

#[test]
fn out_of_bounds_endpoints_yield_empty_path() {
    let pf = Pathfinder::new(Grid::open(3, 3).unwrap());

    assert!(pf.find_path(cell(-1, 0), cell(2, 2)).is_empty());
    assert!(pf.find_path(cell(0, 0), cell(3, 0)).is_empty());
    assert!(pf.find_path(cell(5, 5), cell(5, 5)).is_empty());
}

#[test]
fn start_equal_to_goal_is_single_cell_path() {
    let pf = Pathfinder::new(Grid::open(3, 3).unwrap());
    assert_eq!(pf.find_path(cell(1, 1), cell(1, 1)), vec![cell(1, 1)]);
    assert_eq!(pf.path_cost(&[cell(1, 1)]), Some(0));
}

#[test]
fn blocked_goal_is_unreachable_but_blocked_start_is_not_checked() {
    let grid = Grid::from_rows(&[[1u8, 0, 0], [0, 0, 1]]).unwrap();
    let pf = Pathfinder::new(grid);

    assert!(pf.find_path(cell(1, 0), cell(2, 1)).is_empty());

    let from_blocked = pf.find_path(cell(0, 0), cell(2, 0));
    assert_eq!(from_blocked, vec![cell(0, 0), cell(1, 0), cell(2, 0)]);
}

#[test]
fn search_is_deterministic_for_same_input() {
    let mut grid = Grid::open(10, 10).unwrap();
    for y in 0..10 {
        grid.set_blocked(cell(5, y), true);
    }
    grid.set_blocked(cell(5, 5), false);
    let pf = Pathfinder::new(grid);

    let a = pf.find_path(cell(1, 1), cell(8, 8));
    let b = pf.find_path(cell(1, 1), cell(8, 8));
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn ragged_and_empty_grids_are_rejected() {
    let rows: Vec<Vec<u8>> = vec![vec![0, 0, 0], vec![0, 0]];
    assert_eq!(
        Grid::from_rows(&rows),
        Err(AiError::RaggedGrid {
            row: 1,
            expected: 3,
            found: 2
        })
    );

    let empty: Vec<Vec<u8>> = Vec::new();
    assert_eq!(Grid::from_rows(&empty), Err(AiError::EmptyGrid));
    assert_eq!(Grid::open(0, 4), Err(AiError::EmptyGrid));
}

#[test]
fn path_cost_rejects_broken_walks() {
    let grid = Grid::from_rows(&[[0u8, 0, 0], [0, 1, 0]]).unwrap();
    let pf = Pathfinder::new(grid);

    assert_eq!(pf.path_cost(&[]), None);
    assert_eq!(pf.path_cost(&[cell(0, 0), cell(2, 0)]), None);
    assert_eq!(pf.path_cost(&[cell(1, 0), cell(1, 1)]), None);
    assert_eq!(pf.path_cost(&[cell(0, 0), cell(1, 0), cell(2, 0)]), Some(2));
}

#[test]
fn shared_pathfinder_serves_concurrent_searches() {
    let mut grid = Grid::open(32, 32).unwrap();
    for y in 0..31 {
        grid.set_blocked(cell(16, y), true);
    }
    let pf = Arc::new(Pathfinder::new(grid));
    let expected = pf.find_path(cell(0, 0), cell(31, 0));

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pf = Arc::clone(&pf);
                s.spawn(move || pf.find_path(cell(0, 0), cell(31, 0)))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn navigator_route_keeps_exact_endpoints() {
    let grid = Grid::from_rows(&[[0u8, 0, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]]).unwrap();
    let pf = Pathfinder::new(grid).with_cell_size(2.0).unwrap();

    let from = Vec2::new(0.3, 0.2);
    let to = Vec2::new(6.1, 3.9);
    let route = pf.find_route(from, to).expect("route");

    assert_eq!(route.cells.first(), Some(&cell(0, 0)));
    assert_eq!(route.cells.last(), Some(&cell(3, 2)));
    assert_eq!(route.points.first(), Some(&from));
    assert_eq!(route.points.last(), Some(&to));
    assert_eq!(route.points.len(), route.cells.len());
    assert_eq!(route.steps(), 5);
    // Equal-cost frontier entries pop in (x, y) order, so the route leaves
    // (0,0) through (0,1) and takes the lower corridor.
    assert_eq!(route.points[1], Vec2::new(0.0, 2.0));
}

#[test]
fn cell_size_must_be_positive_and_finite() {
    for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let err = Pathfinder::new(Grid::open(2, 2).unwrap())
            .with_cell_size(bad)
            .unwrap_err();
        assert!(matches!(err, AiError::InvalidConfig(_)), "{bad}: {err:?}");
    }
    let pf = Pathfinder::new(Grid::open(2, 2).unwrap())
        .with_cell_size(0.5)
        .unwrap();
    assert_eq!(pf.cell_size(), 0.5);
}

#[test]
fn world_extent_covers_cell_origins() {
    let pf = Pathfinder::new(Grid::open(20, 10).unwrap())
        .with_cell_size(5.0)
        .unwrap();
    let (min, max) = pf.world_extent();
    assert_eq!(min, Vec2::ZERO);
    assert_eq!(max, Vec2::new(95.0, 45.0));
    assert_eq!(pf.world_to_cell(max), Some(cell(19, 9)));
    assert_eq!(pf.world_to_cell(Vec2::new(100.0, 50.0)), None);
}

#[test]
fn navigator_has_no_route_outside_grid() {
    let pf = Pathfinder::new(Grid::open(4, 4).unwrap());
    assert!(pf.find_route(Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0)).is_none());
}
