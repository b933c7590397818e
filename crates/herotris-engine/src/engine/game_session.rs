use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    PieceCollisionError,
    core::{grid::Grid, piece::Piece, render_grid::RenderGrid, shape::PieceKind},
};

use super::{
    game_field::GameField,
    game_stats::GameStats,
    piece_source::{PieceSeed, PieceSource, RandomPieceSource},
    scoring::ScoringPolicy,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum GameStatus {
    Running,
    Over,
}

/// Player input understood by [`GameSession::apply_command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
}

impl Command {
    pub const ALL: [Self; 5] = [
        Self::MoveLeft,
        Self::MoveRight,
        Self::SoftDrop,
        Self::Rotate,
        Self::HardDrop,
    ];
}

/// Result of locking a piece into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockOutcome {
    pub cleared_lines: usize,
    /// The piece spawned after the lock collided; the game is over.
    pub topped_out: bool,
}

/// What a call to [`GameSession::tick`] or [`GameSession::apply_command`]
/// did.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum Transition {
    /// The game is over; nothing changed.
    Ignored,
    /// The move or rotation was blocked; nothing changed.
    Rejected,
    /// The falling piece moved or rotated.
    Moved,
    /// The falling piece was locked and the next piece spawned.
    Locked(LockOutcome),
}

impl Transition {
    #[must_use]
    pub fn lock_outcome(self) -> Option<LockOutcome> {
        match self {
            Self::Locked(outcome) => Some(outcome),
            _ => None,
        }
    }
}

fn moved_or_rejected(result: Result<(), PieceCollisionError>) -> Transition {
    match result {
        Ok(()) => Transition::Moved,
        Err(PieceCollisionError) => Transition::Rejected,
    }
}

/// A complete game: the field, statistics, speed and status.
///
/// All state changes go through `&mut self` methods, so the lock sequence
/// (fill, clear, score, spawn, top-out check) is never observable half done.
/// Once the status is [`GameStatus::Over`], only [`Self::reset`] has any
/// effect.
///
/// # Example
///
/// ```
/// use herotris_engine::{Command, GameSession, Transition};
///
/// let mut session = GameSession::new();
/// assert_eq!(session.tick(), Transition::Moved);
///
/// let transition = session.apply_command(Command::HardDrop);
/// assert!(transition.is_locked());
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<S = RandomPieceSource> {
    field: GameField<S>,
    stats: GameStats,
    policy: ScoringPolicy,
    drop_interval: Duration,
    status: GameStatus,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with random pieces and the default scoring policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomPieceSource::new(), ScoringPolicy::default())
    }

    /// Creates a session whose piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_source(RandomPieceSource::with_seed(seed), ScoringPolicy::default())
    }
}

impl<S> GameSession<S>
where
    S: PieceSource,
{
    #[must_use]
    pub fn with_source(source: S, policy: ScoringPolicy) -> Self {
        Self::from_field(GameField::new(source), policy)
    }

    /// Starts a session on an existing field.
    ///
    /// The session is [`GameStatus::Over`] from the start if the field's
    /// falling piece already collides with its grid.
    #[must_use]
    pub fn from_field(field: GameField<S>, policy: ScoringPolicy) -> Self {
        let status = if field.is_falling_piece_colliding() {
            GameStatus::Over
        } else {
            GameStatus::Running
        };
        Self {
            field,
            stats: GameStats::new(),
            policy,
            drop_interval: policy.initial_drop_interval,
            status,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.field.grid()
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.field.next_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Current delay between automatic ticks.
    ///
    /// Only changes when a lock clears lines (and on reset); drivers re-arm
    /// their timer when it does.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Advances the game by one step of gravity.
    ///
    /// Moves the falling piece one row down, or locks it if it is resting on
    /// the stack or the floor.
    pub fn tick(&mut self) -> Transition {
        if self.status.is_over() {
            return Transition::Ignored;
        }
        if self.field.try_move(0, 1).is_ok() {
            return Transition::Moved;
        }
        Transition::Locked(self.lock_falling_piece())
    }

    pub fn apply_command(&mut self, command: Command) -> Transition {
        if self.status.is_over() {
            return Transition::Ignored;
        }
        match command {
            Command::MoveLeft => moved_or_rejected(self.field.try_move(-1, 0)),
            Command::MoveRight => moved_or_rejected(self.field.try_move(1, 0)),
            Command::SoftDrop => self.tick(),
            Command::Rotate => moved_or_rejected(self.field.try_rotate_right()),
            Command::HardDrop => {
                let piece = self.field.simulate_drop_position();
                self.field.set_falling_piece_unchecked(piece);
                Transition::Locked(self.lock_falling_piece())
            }
        }
    }

    /// Starts a new game: empty grid, zero statistics, initial speed and a
    /// fresh pair of pieces.
    pub fn reset(&mut self) {
        self.field.reset();
        self.stats = GameStats::new();
        self.drop_interval = self.policy.initial_drop_interval;
        self.status = GameStatus::Running;
    }

    /// Returns the grid as it should be displayed: the committed blocks plus
    /// the falling piece while the game is running.
    #[must_use]
    pub fn render_grid(&self) -> RenderGrid {
        let falling_piece = self.status.is_running().then(|| self.field.falling_piece());
        RenderGrid::new(self.field.grid(), falling_piece.as_ref())
    }

    fn lock_falling_piece(&mut self) -> LockOutcome {
        let (cleared_lines, result) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_lines, &self.policy);
        self.drop_interval = self
            .policy
            .next_drop_interval(self.drop_interval, cleared_lines);
        let topped_out = result.is_err();
        if topped_out {
            self.status = GameStatus::Over;
        }
        LockOutcome {
            cleared_lines,
            topped_out,
        }
    }
}
