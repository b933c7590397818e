use serde::{Deserialize, Serialize};

use super::{
    grid::Grid,
    shape::{PieceKind, Shape},
};

/// A piece with kind, rotation and position on the grid.
///
/// Pieces are immutable - movement and rotation operations return new `Piece`
/// instances, and the checked variants return `None` when the result would
/// collide, leaving the caller's piece unchanged.
///
/// # Example
///
/// ```
/// use herotris_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::EMPTY;
/// let piece = Piece::new(PieceKind::T);
/// assert_eq!((piece.position().x(), piece.position().y()), (3, 0));
///
/// let moved = piece.try_moved(&grid, -1, 0).unwrap();
/// let rotated = moved.try_rotated_right(&grid).unwrap();
/// let landed = rotated.simulate_drop_position(&grid);
/// assert_eq!(landed.position().y(), 17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    rotation: PieceRotation,
    kind: PieceKind,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "S#1@4,18")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.position.x,
            self.position.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!("expected format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let mut kind_chars = kind_str.chars();
        let (Some(kind_char), None) = (kind_chars.next(), kind_chars.next()) else {
            return Err(serde::de::Error::custom(format!(
                "piece kind must be single character, got '{kind_str}'"
            )));
        };
        let kind = PieceKind::from_char(kind_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {kind_char}")))?;

        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing '@' in format 'kind#rotation@x,y', got '{s}'"
            ))
        })?;
        let rotation_num = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation_num > 3 {
            return Err(serde::de::Error::custom(format!(
                "rotation must be 0-3, got {rotation_num}"
            )));
        }

        let (x_str, y_str) = position_str.split_once(',').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing ',' in format 'kind#rotation@x,y', got '{s}'"
            ))
        })?;
        let x = x_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        let position = PiecePosition::new(x, y);
        if !position.is_within_reach() {
            return Err(serde::de::Error::custom(format!(
                "position out of range: {x},{y}"
            )));
        }

        Ok(Piece {
            position,
            rotation: PieceRotation(rotation_num),
            kind,
        })
    }
}

impl Piece {
    /// Spawns a piece of `kind` in its base rotation, horizontally centered
    /// at the top row.
    ///
    /// No collision check is performed here; callers decide what a colliding
    /// spawn means.
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            position: PiecePosition::spawn(&kind.shape()),
            rotation: PieceRotation::default(),
            kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Index of the hero this piece is rendered as.
    #[must_use]
    pub fn hero_index(&self) -> usize {
        self.kind.hero_index()
    }

    /// Shape in the current rotation state.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.kind.rotated_shape(self.rotation.as_usize())
    }

    /// Grid coordinates of every occupied cell (may lie outside the grid).
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> {
        let PiecePosition { x, y } = self.position;
        self.shape()
            .occupied_cells()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Returns the piece translated by `(dx, dy)` without any collision check.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    /// Returns the piece rotated 90° clockwise in place without any collision
    /// check.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }

    /// Returns the piece translated by `(dx, dy)` if that placement does not
    /// collide with `grid`.
    #[must_use]
    pub fn try_moved(&self, grid: &Grid, dx: i32, dy: i32) -> Option<Self> {
        Some(self.moved(dx, dy)).filter(|p| !grid.is_colliding_piece(p))
    }

    /// Returns the piece rotated clockwise at the same position if that does
    /// not collide with `grid`.
    ///
    /// No wall kicks: a rotation that would only fit after shifting the piece
    /// is rejected.
    #[must_use]
    pub fn try_rotated_right(&self, grid: &Grid) -> Option<Self> {
        Some(self.rotated_right()).filter(|p| !grid.is_colliding_piece(p))
    }

    /// Returns the lowest position reachable by repeated one-row drops.
    ///
    /// The piece is not locked.
    #[must_use]
    pub fn simulate_drop_position(&self, grid: &Grid) -> Self {
        let mut dropped = *self;
        while let Some(piece) = dropped.try_moved(grid, 0, 1) {
            dropped = piece;
        }
        dropped
    }
}

/// Position of a piece's top-left shape cell on the grid.
///
/// Coordinates are signed: a piece may extend above row 0, and a position
/// left of column 0 is representable (though it always collides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontally centered position at the top row for `shape`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn spawn(shape: &Shape) -> Self {
        let x = Grid::WIDTH.saturating_sub(shape.width()) / 2;
        Self::new(x as i32, 0)
    }

    /// Returns `true` if the position lies within one grid size of the
    /// grid on every side. Pieces outside this band are rejected when
    /// deserializing, so cell coordinates never approach `i32` limits.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn is_within_reach(self) -> bool {
        const W: i32 = Grid::WIDTH as i32;
        const H: i32 = Grid::HEIGHT as i32;
        (-W..2 * W).contains(&self.x) && (-H..2 * H).contains(&self.y)
    }

    #[must_use]
    pub fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(self) -> i32 {
        self.y
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation wraps around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated_right(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}
