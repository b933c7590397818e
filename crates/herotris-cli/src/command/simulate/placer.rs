use std::{cmp::Reverse, iter};

use arrayvec::ArrayVec;
use herotris_engine::{Command, GameSession, Grid, PieceSource, Transition};

/// Commands that steer the falling piece to one placement and drop it.
///
/// At most three rotations, nine shifts and the final hard drop.
pub(crate) type Plan = ArrayVec<Command, 16>;

/// Ranking of a placement; larger is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PlacementRank {
    survived: bool,
    cleared_lines: usize,
    stack_height: Reverse<usize>,
    holes: Reverse<usize>,
}

/// Picks the placement of the falling piece that clears the most lines, then
/// keeps the stack lowest, then leaves the fewest holes.
///
/// Every distinct rotation and column is played out on a clone of
/// `session`; placements the piece cannot reach are skipped. Returns `None`
/// once the game is over.
pub(crate) fn best_plan<S>(session: &GameSession<S>) -> Option<Plan>
where
    S: PieceSource + Clone,
{
    if session.status().is_over() {
        return None;
    }

    let mut piece = session.falling_piece();
    let rotations = piece.kind().shape().rotations().len();
    let mut best: Option<(PlacementRank, Plan)> = None;

    for rotation in 0..rotations {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let max_x = (Grid::WIDTH - piece.shape().width()) as i32;
        for x in 0..=max_x {
            let plan = plan_for(rotation, x - piece.position().x());
            let Some(rank) = evaluate(session, &plan) else {
                continue;
            };
            if best.as_ref().is_none_or(|(best_rank, _)| rank > *best_rank) {
                best = Some((rank, plan));
            }
        }
        piece = piece.rotated_right();
    }

    best.map(|(_, plan)| plan)
}

fn plan_for(rotations: usize, shift: i32) -> Plan {
    let step = if shift < 0 {
        Command::MoveLeft
    } else {
        Command::MoveRight
    };
    let mut plan = Plan::new();
    plan.extend(iter::repeat_n(Command::Rotate, rotations));
    plan.extend(iter::repeat_n(step, shift.unsigned_abs() as usize));
    plan.push(Command::HardDrop);
    plan
}

fn evaluate<S>(session: &GameSession<S>, plan: &Plan) -> Option<PlacementRank>
where
    S: PieceSource + Clone,
{
    let mut trial = session.clone();
    let mut outcome = None;
    for &command in plan {
        match trial.apply_command(command) {
            Transition::Moved => {}
            Transition::Locked(lock) => outcome = Some(lock),
            Transition::Rejected | Transition::Ignored => return None,
        }
    }
    let outcome = outcome?;

    Some(PlacementRank {
        survived: !outcome.topped_out,
        cleared_lines: outcome.cleared_lines,
        stack_height: Reverse(stack_height(trial.grid())),
        holes: Reverse(count_holes(trial.grid())),
    })
}

fn stack_height(grid: &Grid) -> usize {
    grid.rows()
        .position(|row| row.iter().any(|block| !block.is_empty()))
        .map_or(0, |top| Grid::HEIGHT - top)
}

/// Empty cells with at least one filled cell above them in the same column.
fn count_holes(grid: &Grid) -> usize {
    (0..Grid::WIDTH)
        .map(|x| {
            (0..Grid::HEIGHT)
                .filter_map(|y| grid.block(x, y))
                .skip_while(|block| block.is_empty())
                .filter(|block| block.is_empty())
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use herotris_engine::{Block, GameField, PieceKind, ScoringPolicy, SequencePieceSource};

    use super::*;

    fn session_with_grid(grid: Grid, kinds: &[PieceKind]) -> GameSession<SequencePieceSource> {
        let source = SequencePieceSource::new(kinds.iter().copied());
        GameSession::from_field(GameField::with_grid(source, grid), ScoringPolicy::default())
    }

    #[test]
    fn test_plan_for() {
        let plan = plan_for(1, -2);
        assert_eq!(
            plan.as_slice(),
            [
                Command::Rotate,
                Command::MoveLeft,
                Command::MoveLeft,
                Command::HardDrop
            ]
        );
        assert_eq!(plan_for(0, 0).as_slice(), [Command::HardDrop]);
    }

    #[test]
    fn test_grid_metrics() {
        let mut grid = Grid::EMPTY;
        assert_eq!(stack_height(&grid), 0);
        assert_eq!(count_holes(&grid), 0);

        grid.set_block(2, 17, Block::Piece(PieceKind::T));
        grid.set_block(2, 19, Block::Piece(PieceKind::T));
        grid.set_block(5, 19, Block::Piece(PieceKind::T));
        assert_eq!(stack_height(&grid), 3);
        assert_eq!(count_holes(&grid), 1);
    }

    #[test]
    fn test_prefers_clearing_lines() {
        let mut grid = Grid::EMPTY;
        for x in 4..Grid::WIDTH {
            grid.set_block(x, Grid::HEIGHT - 1, Block::Piece(PieceKind::O));
        }
        let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O]);

        let plan = best_plan(&session).unwrap();
        assert_eq!(plan.last(), Some(&Command::HardDrop));
        for command in plan {
            session.apply_command(command);
        }
        assert_eq!(session.score(), 100);
        assert!(session.grid().is_empty());
    }

    #[test]
    fn test_prefers_flat_placement() {
        // On an empty grid the I lies flat rather than standing upright.
        let session = session_with_grid(Grid::EMPTY, &[PieceKind::I]);
        let plan = best_plan(&session).unwrap();
        assert!(!plan.contains(&Command::Rotate));
    }

    #[test]
    fn test_no_plan_after_game_over() {
        let mut grid = Grid::EMPTY;
        grid.set_block(4, 1, Block::Piece(PieceKind::S));
        let mut session = session_with_grid(grid, &[PieceKind::I, PieceKind::O]);
        session.apply_command(Command::HardDrop);
        assert!(session.status().is_over());
        assert!(best_plan(&session).is_none());
    }
}
