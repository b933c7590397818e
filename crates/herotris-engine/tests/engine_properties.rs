//! Scenario and property tests for the game session state machine.
//!
//! Scenarios pin exact outcomes with scripted piece sequences and prepared
//! grids; properties drive seeded sessions with generated command sequences
//! and check invariants that must hold after every transition.

use std::time::Duration;

use herotris_engine::{
    Block, Command, GameField, GameSession, GameStatus, Grid, LockOutcome, PieceKind, PieceSeed,
    RenderBlock, ScoringPolicy, SequencePieceSource, Transition,
};
use proptest::prelude::*;

fn session_with_grid(grid: Grid, kinds: &[PieceKind]) -> GameSession<SequencePieceSource> {
    let source = SequencePieceSource::new(kinds.iter().copied());
    GameSession::from_field(GameField::with_grid(source, grid), ScoringPolicy::default())
}

/// Fills rows `ys` except the columns in `holes`.
fn grid_with_rows(ys: impl IntoIterator<Item = usize>, holes: &[usize]) -> Grid {
    let mut grid = Grid::EMPTY;
    for y in ys {
        for x in (0..Grid::WIDTH).filter(|x| !holes.contains(x)) {
            grid.set_block(x, y, Block::Piece(PieceKind::S));
        }
    }
    grid
}

fn has_full_row(grid: &Grid) -> bool {
    grid.rows().any(|row| row.iter().all(|block| !block.is_empty()))
}

#[test]
fn single_line_clear_scores_100() {
    let grid = grid_with_rows([19], &[3, 4, 5, 6]);
    let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O]);

    let transition = session.apply_command(Command::HardDrop);
    assert_eq!(
        transition,
        Transition::Locked(LockOutcome {
            cleared_lines: 1,
            topped_out: false,
        })
    );
    assert_eq!(session.score(), 100);
    assert_eq!(session.drop_interval(), Duration::from_millis(950));
    assert!(session.grid().is_empty());
}

#[test]
fn four_line_clear_scores_1600() {
    let grid = grid_with_rows(16..20, &[0]);
    let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::T]);

    assert_eq!(session.apply_command(Command::Rotate), Transition::Moved);
    while session.apply_command(Command::MoveLeft).is_moved() {}
    assert_eq!(session.falling_piece().position().x(), 0);

    let outcome = session.apply_command(Command::HardDrop).lock_outcome();
    assert_eq!(outcome.map(|o| o.cleared_lines), Some(4));
    assert_eq!(session.score(), 1600);
    assert_eq!(session.drop_interval(), Duration::from_millis(800));
    assert_eq!(session.stats().line_cleared_counter()[4], 1);
    assert!(session.grid().is_empty());
}

#[test]
fn separated_rows_clear_in_one_lock() {
    // Rows 17 and 19 are full except column 0. The vertical I fills column 0
    // of rows 16..=19, completing rows 17 and 19 but not 16 and 18.
    let mut grid = grid_with_rows([17, 19], &[0]);
    grid.set_block(5, 18, Block::Piece(PieceKind::T));
    let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O]);

    session.apply_command(Command::Rotate);
    while session.apply_command(Command::MoveLeft).is_moved() {}
    let outcome = session.apply_command(Command::HardDrop).lock_outcome();

    assert_eq!(outcome.map(|o| o.cleared_lines), Some(2));
    assert_eq!(session.score(), 400);
    // Row 18 shifts to the bottom with the I cell beside it; row 16 lands above.
    assert_eq!(session.grid().block(5, 19), Some(Block::Piece(PieceKind::T)));
    assert_eq!(session.grid().block(0, 19), Some(Block::Piece(PieceKind::I)));
    assert_eq!(session.grid().block(0, 18), Some(Block::Piece(PieceKind::I)));
    assert_eq!(session.grid().block(1, 18), Some(Block::Empty));
}

#[test]
fn spawn_collision_ends_game_on_the_lock_step() {
    // The obstacle stops the I on the spawn row, where the next O collides.
    let mut grid = Grid::EMPTY;
    grid.set_block(5, 1, Block::Piece(PieceKind::Z));
    let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O]);

    assert!(session.status().is_running());
    let transition = session.tick();
    assert_eq!(
        transition,
        Transition::Locked(LockOutcome {
            cleared_lines: 0,
            topped_out: true,
        })
    );
    assert_eq!(session.status(), GameStatus::Over);

    let grid = session.grid().clone();
    let stats = session.stats().clone();
    for _ in 0..3 {
        assert_eq!(session.tick(), Transition::Ignored);
    }
    for command in Command::ALL {
        assert_eq!(session.apply_command(command), Transition::Ignored);
    }
    assert_eq!(session.grid(), &grid);
    assert_eq!(session.stats(), &stats);
    assert_eq!(session.status(), GameStatus::Over);

    // Only committed blocks are displayed once the game is over.
    let render = session.render_grid();
    assert!(
        render
            .rows()
            .flatten()
            .all(|block| !matches!(block, RenderBlock::Falling(_)))
    );
}

#[test]
fn clear_frees_blocked_spawn_area() {
    // The obstacle sits where the next O spawns. Clearing the four bottom
    // rows shifts it down, so the spawn check against the cleared grid passes.
    let mut grid = grid_with_rows(16..20, &[9]);
    grid.set_block(4, 1, Block::Piece(PieceKind::Z));
    grid.set_block(5, 1, Block::Piece(PieceKind::Z));
    let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O]);

    while session.apply_command(Command::MoveRight).is_moved() {}
    assert_eq!(session.apply_command(Command::Rotate), Transition::Moved);
    while session.apply_command(Command::MoveRight).is_moved() {}
    assert_eq!(session.falling_piece().position().x(), 9);

    let transition = session.apply_command(Command::HardDrop);
    assert_eq!(
        transition,
        Transition::Locked(LockOutcome {
            cleared_lines: 4,
            topped_out: false,
        })
    );
    assert_eq!(session.status(), GameStatus::Running);
    assert_eq!(session.falling_piece().kind(), PieceKind::O);
    assert_eq!(session.grid().block(4, 1), Some(Block::Empty));
    assert_eq!(session.grid().block(4, 5), Some(Block::Piece(PieceKind::Z)));
    assert_eq!(session.tick(), Transition::Moved);
}

#[test]
fn lock_without_clear_keeps_other_rows_in_place() {
    // Each row has a hole every third column, tagged with its own kind, so no
    // piece can complete a row and any shift or reordering changes a row.
    let mut grid = Grid::EMPTY;
    for y in 12..Grid::HEIGHT {
        let kind = PieceKind::ALL[y % PieceKind::LEN];
        for x in (0..Grid::WIDTH).filter(|x| (x + y) % 3 != 0) {
            grid.set_block(x, y, Block::Piece(kind));
        }
    }

    for kind in PieceKind::ALL {
        for shift in -4_i32..=4 {
            let mut session = session_with_grid(grid.clone(), &[kind, PieceKind::O]);
            session.apply_command(Command::Rotate);
            let command = if shift < 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            };
            for _ in 0..shift.unsigned_abs() {
                session.apply_command(command);
            }

            let landed = session.falling_piece().simulate_drop_position(&grid);
            let cells: Vec<(usize, usize)> = landed
                .occupied_positions()
                .map(|(x, y)| (usize::try_from(x).unwrap(), usize::try_from(y).unwrap()))
                .collect();
            let outcome = session.apply_command(Command::HardDrop).lock_outcome();
            assert_eq!(outcome.map(|o| o.cleared_lines), Some(0), "{kind:?} {shift}");

            let after = session.grid();
            assert_eq!(after.rows().count(), Grid::HEIGHT);
            for (y, (before_row, after_row)) in grid.rows().zip(after.rows()).enumerate() {
                for x in 0..Grid::WIDTH {
                    let expected = if cells.contains(&(x, y)) {
                        Block::Piece(kind)
                    } else {
                        before_row[x]
                    };
                    assert_eq!(after_row[x], expected, "{kind:?} {shift} ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn reset_from_game_over_starts_fresh() {
    let mut grid = Grid::EMPTY;
    grid.set_block(4, 1, Block::Piece(PieceKind::Z));
    let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O, PieceKind::T]);
    session.apply_command(Command::HardDrop);
    assert!(session.status().is_over());

    session.reset();
    assert_eq!(session.status(), GameStatus::Running);
    assert!(session.grid().is_empty());
    assert_eq!(session.score(), 0);
    assert_eq!(session.drop_interval(), Duration::from_millis(1000));
    assert_eq!(session.falling_piece().kind(), PieceKind::I);
    assert_eq!(session.next_piece(), PieceKind::O);
    assert_eq!(session.tick(), Transition::Moved);
}

#[test]
fn hard_drop_rests_on_lowest_row() {
    let mut session = session_with_grid(Grid::EMPTY, &[PieceKind::T, PieceKind::S]);
    session.apply_command(Command::HardDrop);
    assert_eq!(session.grid().block(4, 19), Some(Block::Piece(PieceKind::T)));
    assert_eq!(session.grid().block(4, 18), Some(Block::Piece(PieceKind::T)));
    assert_eq!(session.grid().block(3, 18), Some(Block::Empty));
}

#[test]
fn soft_drop_matches_tick() {
    let mut by_tick = GameSession::with_seed(PieceSeed::from(11));
    let mut by_command = by_tick.clone();
    for _ in 0..60 {
        let expected = by_tick.tick();
        assert_eq!(by_command.apply_command(Command::SoftDrop), expected);
        assert_eq!(by_command.grid(), by_tick.grid());
        assert_eq!(by_command.falling_piece(), by_tick.falling_piece());
    }
    assert_eq!(by_command.stats(), by_tick.stats());
}

#[test]
fn rotation_four_times_restores_shape() {
    for kind in PieceKind::ALL {
        let shape = kind.shape();
        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotated.rotated_clockwise();
        }
        assert_eq!(rotated, shape, "{kind:?}");
        assert!(rotated.occupied_cells().eq(shape.occupied_cells()));
    }
}

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    (0..PieceKind::LEN).prop_map(|i| PieceKind::from_hero_index(i).unwrap())
}

fn command() -> impl Strategy<Value = Command> {
    prop::sample::select(Command::ALL.to_vec())
}

proptest! {
    #[test]
    fn collision_matches_bounds_on_empty_grid(
        kind in piece_kind(),
        rotations in 0..4usize,
        x in -4..14i32,
        y in -4..24i32,
    ) {
        let mut shape = kind.shape();
        for _ in 0..rotations {
            shape = shape.rotated_clockwise();
        }
        let width = i32::try_from(shape.width()).unwrap();
        let height = i32::try_from(shape.height()).unwrap();
        let out_of_bounds = x < 0
            || x + width > i32::try_from(Grid::WIDTH).unwrap()
            || y + height > i32::try_from(Grid::HEIGHT).unwrap();

        prop_assert_eq!(Grid::EMPTY.is_colliding(&shape, x, y), out_of_bounds);
    }

    #[test]
    fn generated_commands_respect_session_invariants(
        seed in any::<u128>(),
        commands in prop::collection::vec(prop::option::of(command()), 1..400),
    ) {
        let mut session = GameSession::with_seed(PieceSeed::from(seed));
        let policy = *session.policy();

        for command in commands {
            let score = session.score();
            let interval = session.drop_interval();
            let was_over = session.status().is_over();

            // `None` stands for a gravity tick between inputs.
            let transition = match command {
                Some(command) => session.apply_command(command),
                None => session.tick(),
            };

            prop_assert!(session.score() >= score);
            prop_assert!(session.drop_interval() <= interval);
            prop_assert!(session.drop_interval() >= policy.min_drop_interval);
            prop_assert!(!has_full_row(session.grid()));

            if was_over {
                prop_assert_eq!(transition, Transition::Ignored);
                prop_assert!(session.status().is_over());
            } else if let Some(outcome) = transition.lock_outcome() {
                prop_assert_eq!(session.score() - score, policy.score_for(outcome.cleared_lines));
                prop_assert_eq!(outcome.topped_out, session.status().is_over());
            }
            if session.status().is_running() {
                prop_assert!(!session.grid().is_colliding_piece(&session.falling_piece()));
            }
        }
    }

    #[test]
    fn same_seed_replays_identically(
        seed in any::<u128>(),
        commands in prop::collection::vec(command(), 1..200),
    ) {
        let mut a = GameSession::with_seed(PieceSeed::from(seed));
        let mut b = GameSession::with_seed(PieceSeed::from(seed));
        for command in commands {
            prop_assert_eq!(a.apply_command(command), b.apply_command(command));
            prop_assert_eq!(a.next_piece(), b.next_piece());
        }
        prop_assert_eq!(a.grid(), b.grid());
        prop_assert_eq!(a.stats(), b.stats());
        prop_assert_eq!(a.status(), b.status());
    }
}
