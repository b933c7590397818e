use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{grid::Grid, piece::Piece, shape::PieceKind},
};

use super::{
    piece_buffer::PieceBuffer,
    piece_source::{PieceSource, RandomPieceSource},
};

/// Single-turn game state: the committed grid, the falling piece and the
/// preview piece.
///
/// `GameField` knows nothing about scoring or game status; it only enforces
/// that a checked update never leaves the falling piece colliding, and
/// reports when a newly spawned piece does.
#[derive(Debug, Clone)]
pub struct GameField<S = RandomPieceSource> {
    grid: Grid,
    falling_piece: Piece,
    piece_buffer: PieceBuffer<S>,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new(RandomPieceSource::new())
    }
}

impl<S> GameField<S>
where
    S: PieceSource,
{
    /// Creates an empty field, spawning the first piece from `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        let mut piece_buffer = PieceBuffer::new(source);
        let falling_piece = Piece::new(piece_buffer.pop_next());
        Self {
            grid: Grid::EMPTY,
            falling_piece,
            piece_buffer,
        }
    }

    /// Like [`Self::new`], but starting from a prepared grid.
    ///
    /// The first piece is spawned without a collision check; use
    /// [`Self::is_falling_piece_colliding`] to detect a blocked spawn.
    /// [`GameSession::from_field`](crate::GameSession::from_field) does this
    /// and starts such a session already over.
    #[must_use]
    pub fn with_grid(source: S, grid: Grid) -> Self {
        Self {
            grid,
            ..Self::new(source)
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.piece_buffer.next_piece()
    }

    /// Returns `true` if the falling piece overlaps the grid or its walls.
    #[must_use]
    pub fn is_falling_piece_colliding(&self) -> bool {
        self.grid.is_colliding_piece(&self.falling_piece)
    }

    /// Replaces the falling piece if the new placement does not collide.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.grid.is_colliding_piece(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Replaces the falling piece without checking for collisions.
    pub fn set_falling_piece_unchecked(&mut self, piece: Piece) {
        self.falling_piece = piece;
    }

    /// Translates the falling piece by `(dx, dy)`; a blocked move leaves it
    /// unchanged.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .try_moved(&self.grid, dx, dy)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = piece;
        Ok(())
    }

    /// Rotates the falling piece clockwise; a blocked rotation leaves it
    /// unchanged.
    pub fn try_rotate_right(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self
            .falling_piece
            .try_rotated_right(&self.grid)
            .ok_or(PieceCollisionError)?;
        self.falling_piece = piece;
        Ok(())
    }

    /// Returns where the falling piece would land if hard dropped.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.falling_piece.simulate_drop_position(&self.grid)
    }

    /// Locks the falling piece and spawns the next one.
    ///
    /// In order: fills the falling piece into the grid, clears full lines,
    /// promotes the preview piece to a freshly spawned falling piece, and
    /// checks that spawn against the grid as it stands after the clear.
    ///
    /// Returns the number of cleared lines, and an error if the new piece
    /// collides at its spawn position (a top-out).
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.grid.fill_piece(&self.falling_piece);
        let cleared_lines = self.grid.clear_lines();

        self.falling_piece = Piece::new(self.piece_buffer.pop_next());
        if self.is_falling_piece_colliding() {
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }

    /// Empties the grid and spawns a fresh falling/preview pair.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.falling_piece = Piece::new(self.piece_buffer.restart());
    }
}
