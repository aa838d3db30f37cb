mod common;

use astar_grid::heuristic::manhattan;
use astar_grid::pathfinding::{find_path, format_path, AStarSearch, SearchOutcome, SearchStep, StepControl};
use astar_grid::{Grid, Position, Role};
use common::{bfs_distance, is_contiguous, layout, scattered_grid, visualize_path, XorShift};

#[test]
fn test_open_grid_paths_have_manhattan_length() {
    let size = 5;
    for start_id in 0..(size * size) {
        for end_id in 0..(size * size) {
            let start = Position::new(start_id / size, start_id % size);
            let end = Position::new(end_id / size, end_id % size);
            let mut grid = Grid::new(size);

            let outcome = find_path(&mut grid, start, end).unwrap();
            let path = outcome.path().expect("open grid always has a path");

            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            assert!(is_contiguous(path), "broken path {}", format_path(path));
            assert_eq!(
                (path.len() - 1) as u32,
                manhattan(start, end),
                "{:?} -> {:?}: {}",
                start,
                end,
                format_path(path)
            );
        }
    }
}

#[test]
fn test_wall_detour() {
    println!("\n=== Wall with a gap in the bottom row ===");

    let mut fixture = layout(
        "
        S□■□E
        □□■□□
        □□■□□
        □□■□□
        □□□□□
        ",
    );
    let start = fixture.start.unwrap();
    let end = fixture.end.unwrap();

    let outcome = find_path(&mut fixture.grid, start, end).unwrap();
    let path = outcome.path().expect("Path should exist around the wall");

    println!("{}", visualize_path(&fixture.grid, path));

    // Down to row 4, through the gap at column 2, back up to row 0
    assert_eq!(path.len() - 1, 12);
    assert!(path.contains(&Position::new(4, 2)));
    assert!(is_contiguous(path));
    assert_eq!(fixture.grid.count(Role::Path), 11);
    assert_eq!(fixture.grid.role(start), Ok(Role::Start));
    assert_eq!(fixture.grid.role(end), Ok(Role::End));
}

#[test]
fn test_full_wall_reports_no_path() {
    let mut fixture = layout(
        "
        S□□□□
        □□□□□
        ■■■■■
        □□□□□
        □□□□E
        ",
    );
    let start = fixture.start.unwrap();
    let end = fixture.end.unwrap();

    let outcome = find_path(&mut fixture.grid, start, end).unwrap();
    assert_eq!(outcome, SearchOutcome::NoPath);
    assert_eq!(fixture.grid.count(Role::Path), 0);

    // Every reachable cell above the wall except the start was expanded
    let visited = fixture.grid.positions_with(Role::Visited);
    assert_eq!(visited.len(), 9);
    assert!(visited.iter().all(|pos| pos.row < 2));
    assert_eq!(fixture.grid.role(start), Ok(Role::Start));
    assert_eq!(fixture.grid.role(end), Ok(Role::End));
}

#[test]
fn test_enclosed_end_reports_no_path() {
    let mut fixture = layout(
        "
        S□□□□□
        □□□□□□
        □□■■■□
        □□■E■□
        □□■■■□
        □□□□□□
        ",
    );
    let start = fixture.start.unwrap();
    let end = fixture.end.unwrap();

    let outcome = find_path(&mut fixture.grid, start, end).unwrap();
    assert_eq!(outcome, SearchOutcome::NoPath);
    assert_eq!(fixture.grid.count(Role::Path), 0);
    assert_eq!(fixture.grid.count(Role::Visited), 36 - 9 - 1);
}

#[test]
fn test_found_exactly_when_reachable() {
    let mut rng = XorShift::new(0x5eed);
    for _ in 0..200 {
        let size = 3 + rng.below(6) as i32;
        let mut grid = scattered_grid(size, 30, &mut rng);
        let start = Position::new(rng.below(size as u64) as i32, rng.below(size as u64) as i32);
        let end = Position::new(rng.below(size as u64) as i32, rng.below(size as u64) as i32);
        grid.set_role(start, Role::Start).unwrap();
        grid.set_role(end, Role::End).unwrap();

        let expected = bfs_distance(&grid, start, end);
        let outcome = find_path(&mut grid, start, end).unwrap();

        match (expected, outcome.path()) {
            (Some(_), Some(path)) => {
                assert!(is_contiguous(path));
                assert!(path.iter().all(|&pos| grid.role(pos) != Ok(Role::Obstacle)));
            }
            (None, None) => assert_eq!(grid.count(Role::Path), 0),
            (expected, _) => panic!(
                "reachability mismatch: bfs {:?}, search {:?}\n{}",
                expected,
                outcome,
                astar_grid::layout::to_layout(&grid)
            ),
        }
    }
}

#[test]
fn test_adjacent_cells_mark_no_path_cells() {
    let mut fixture = layout(
        "
        SE□
        □□□
        □□□
        ",
    );
    let start = fixture.start.unwrap();
    let end = fixture.end.unwrap();

    let outcome = find_path(&mut fixture.grid, start, end).unwrap();
    assert_eq!(outcome, SearchOutcome::Found(vec![start, end]));
    assert_eq!(fixture.grid.count(Role::Path), 0);
    assert_eq!(fixture.grid.count(Role::Visited), 0);
}

#[test]
fn test_ties_go_to_first_inserted() {
    let mut grid = Grid::new(3);
    let outcome = find_path(&mut grid, Position::new(0, 0), Position::new(2, 2)).unwrap();

    // Down is relaxed before right, so the earlier-inserted column wins ties
    assert_eq!(
        outcome.path().unwrap(),
        &[
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(2, 1),
            Position::new(2, 2),
        ]
    );
}

#[test]
fn test_steps_expand_then_mark_in_path_order() {
    let mut fixture = layout(
        "
        S□□□
        ■■■□
        □□□□
        E□□□
        ",
    );
    let start = fixture.start.unwrap();
    let end = fixture.end.unwrap();
    fixture.grid.refresh_neighbors();

    let mut search = AStarSearch::new(&fixture.grid, start, end).unwrap();
    let mut expanded = Vec::new();
    let mut marked = Vec::new();
    let outcome = loop {
        match search.step(&mut fixture.grid) {
            SearchStep::Expanded(pos) => {
                assert!(marked.is_empty(), "no expansion after tracing starts");
                expanded.push(pos);
            }
            SearchStep::Marked(pos) => marked.push(pos),
            SearchStep::Finished(outcome) => break outcome,
        }
    };

    let path = outcome.path().unwrap().to_vec();
    assert_eq!(path.len() - 1, 9);
    assert_eq!(marked, path[1..path.len() - 1].to_vec());
    assert_eq!(expanded.first(), Some(&start));
    assert!(!expanded.contains(&end));
    assert!(search.is_finished());
    assert_eq!(search.stats().expanded, expanded.len());
    assert_eq!(search.stats().path_len, Some(9));
    assert_eq!(search.g_score(&fixture.grid, end), Some(9));
    assert_eq!(search.f_score(&fixture.grid, start), Some(manhattan(start, end)));

    // Finished searches keep reporting their outcome
    assert_eq!(search.step(&mut fixture.grid), SearchStep::Finished(outcome));
}

#[test]
fn test_callback_runs_once_per_step() {
    let mut grid = Grid::new(6);
    let start = Position::new(0, 0);
    let end = Position::new(5, 5);
    grid.refresh_neighbors();

    let mut search = AStarSearch::new(&grid, start, end).unwrap();
    let mut calls = 0;
    let outcome = search.run(&mut grid, |_| {
        calls += 1;
        StepControl::Continue
    });

    assert!(outcome.is_found());
    let interior = grid.count(Role::Path);
    assert_eq!(interior, 9);
    assert_eq!(calls, search.stats().expanded + interior);
}

#[test]
fn test_abort_from_callback_keeps_partial_marks() {
    let mut grid = Grid::new(8);
    let start = Position::new(0, 0);
    let end = Position::new(7, 7);
    grid.refresh_neighbors();

    let mut search = AStarSearch::new(&grid, start, end).unwrap();
    let mut calls = 0;
    let outcome = search.run(&mut grid, |_| {
        calls += 1;
        if calls == 4 {
            StepControl::Abort
        } else {
            StepControl::Continue
        }
    });

    assert_eq!(outcome, SearchOutcome::Aborted);
    // Four expansions, the first of which was the start
    assert_eq!(grid.count(Role::Visited), 3);
    assert_eq!(grid.count(Role::Path), 0);
    assert_eq!(search.outcome(), Some(&SearchOutcome::Aborted));
    assert_eq!(search.step(&mut grid), SearchStep::Finished(SearchOutcome::Aborted));
}

#[test]
fn test_previous_marks_stay_walkable() {
    let mut fixture = layout(
        "
        S□□□
        ■■□■
        □□□□
        □□□E
        ",
    );
    let start = fixture.start.unwrap();
    let end = fixture.end.unwrap();

    let first = find_path(&mut fixture.grid, start, end).unwrap();
    let second = find_path(&mut fixture.grid, start, end).unwrap();
    assert_eq!(first.path().map(|p| p.len()), Some(7));
    assert_eq!(first, second);
}

#[test]
fn test_out_of_bounds_endpoints_are_rejected() {
    let grid = Grid::new(4);
    assert!(AStarSearch::new(&grid, Position::new(0, 0), Position::new(4, 0)).is_err());
    assert!(AStarSearch::new(&grid, Position::new(-1, 0), Position::new(1, 1)).is_err());
}

#[test]
fn test_format_path() {
    assert_eq!(format_path(&[]), "No path");
    assert_eq!(
        format_path(&[Position::new(0, 0), Position::new(0, 1)]),
        "(0,0) -> (0,1)"
    );
}
