use super::{
    piece::Piece,
    shape::{PieceKind, Shape},
};

/// A single cell of the committed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked cell of a piece; the kind carries the hero index.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

type Row = [Block; Grid::WIDTH];

const EMPTY_ROW: Row = [Block::Empty; Grid::WIDTH];

/// The committed playing field: a fixed `WIDTH × HEIGHT` matrix of blocks.
///
/// Only locked pieces live here; the falling piece is kept separately by
/// [`GameField`](crate::GameField) and overlaid for display by
/// [`RenderGrid`](super::render_grid::RenderGrid).
///
/// # Coordinate System
///
/// - `(0, 0)` is the top-left cell
/// - X increases rightward (columns), Y increases downward (rows)
/// - Piece positions are signed so that shapes may poke above row 0
///
/// # Example
///
/// ```
/// use herotris_engine::{Grid, PieceKind};
///
/// let mut grid = Grid::EMPTY;
/// let shape = PieceKind::O.shape();
///
/// assert!(!grid.is_colliding(&shape, 0, 18));
/// assert!(grid.is_colliding(&shape, 0, 19)); // below the floor
/// assert!(grid.is_colliding(&shape, -1, 0)); // left of the wall
///
/// grid.fill_shape(&shape, 0, 18, PieceKind::O);
/// assert!(grid.is_colliding(&shape, 1, 17));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; Grid::HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; Self::HEIGHT],
    };

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block; Self::WIDTH]> {
        self.rows.iter()
    }

    /// Returns the block at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn block(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_block(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Returns `true` if no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|b| b.is_empty())
    }

    /// Tests whether `shape` placed with its top-left cell at `(x, y)` collides.
    ///
    /// An occupied shape cell collides when it lies left or right of the grid,
    /// below the floor, or on an occupied grid cell. Cells above row 0 only
    /// collide with the side walls, so pieces can spawn partially above the
    /// visible grid.
    #[must_use]
    pub fn is_colliding(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.occupied_cells().any(|(dx, dy)| {
            let (Some(cx), Some(cy)) = (x.checked_add(dx), y.checked_add(dy)) else {
                return true;
            };
            let Ok(col) = usize::try_from(cx) else {
                return true;
            };
            if col >= Self::WIDTH {
                return true;
            }
            let Ok(row) = usize::try_from(cy) else {
                return false;
            };
            row >= Self::HEIGHT || !self.rows[row][col].is_empty()
        })
    }

    /// Like [`Self::is_colliding`], for a piece at its own position.
    #[must_use]
    pub fn is_colliding_piece(&self, piece: &Piece) -> bool {
        let position = piece.position();
        self.is_colliding(&piece.shape(), position.x(), position.y())
    }

    /// Writes `kind` into every cell covered by `shape` at `(x, y)`.
    ///
    /// Cells outside the grid are skipped. No collision check is performed;
    /// callers validate the placement first.
    pub fn fill_shape(&mut self, shape: &Shape, x: i32, y: i32, kind: PieceKind) {
        for (dx, dy) in shape.occupied_cells() {
            let (Some(cx), Some(cy)) = (x.checked_add(dx), y.checked_add(dy)) else {
                continue;
            };
            let (Ok(col), Ok(row)) = (usize::try_from(cx), usize::try_from(cy)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = Block::Piece(kind);
            }
        }
    }

    /// Locks `piece` into the grid at its current position.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let position = piece.position();
        self.fill_shape(&piece.shape(), position.x(), position.y(), piece.kind());
    }

    /// Clears full rows and returns how many were removed.
    ///
    /// Rows above each cleared row shift down; empty rows are inserted at the
    /// top so the height stays constant. Remaining rows keep their relative
    /// order, and any combination of adjacent or separated full rows is
    /// handled in a single pass.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if is_row_filled(&self.rows[y]) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }
}

fn is_row_filled(row: &Row) -> bool {
    row.iter().all(|b| !b.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: usize, kind: PieceKind) {
        for x in 0..Grid::WIDTH {
            grid.set_block(x, y, Block::Piece(kind));
        }
    }

    #[test]
    fn test_initial_grid_is_empty() {
        let grid = Grid::EMPTY;
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), Grid::HEIGHT);
        assert_eq!(grid.block(Grid::WIDTH, 0), None);
        assert_eq!(grid.block(0, Grid::HEIGHT), None);
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let grid = Grid::EMPTY;
        let i = PieceKind::I.shape();
        assert!(!grid.is_colliding(&i, 0, 0));
        assert!(!grid.is_colliding(&i, 6, 19));
        assert!(grid.is_colliding(&i, -1, 0));
        assert!(grid.is_colliding(&i, 7, 0));
        assert!(grid.is_colliding(&i, 0, 20));
    }

    #[test]
    fn test_collision_at_coordinate_limits() {
        let mut grid = Grid::EMPTY;
        let o = PieceKind::O.shape();
        assert!(grid.is_colliding(&o, i32::MAX, 0));
        assert!(grid.is_colliding(&o, 0, i32::MAX));
        assert!(grid.is_colliding(&o, i32::MIN, 0));

        grid.fill_shape(&o, i32::MAX, i32::MAX, PieceKind::O);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_cells_above_grid_ignore_occupancy() {
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 0, PieceKind::O);
        let o = PieceKind::O.shape();
        // Entirely above the grid: no occupancy check.
        assert!(!grid.is_colliding(&o, 0, -2));
        // Bottom row of the shape reaches row 0, which is full.
        assert!(grid.is_colliding(&o, 0, -1));
        // Still bounded horizontally while above the grid.
        assert!(grid.is_colliding(&o, 9, -2));
    }

    #[test]
    fn test_collision_with_stack() {
        let mut grid = Grid::EMPTY;
        grid.set_block(4, 19, Block::Piece(PieceKind::T));
        let t = PieceKind::T.shape();
        // T occupies (1,0), (0,1), (1,1), (2,1) relative to its origin.
        assert!(grid.is_colliding(&t, 3, 18));
        assert!(!grid.is_colliding(&t, 5, 18));
        assert!(!grid.is_colliding(&t, 3, 17));
    }

    #[test]
    fn test_fill_shape_skips_cells_outside() {
        let mut grid = Grid::EMPTY;
        let o = PieceKind::O.shape();
        grid.fill_shape(&o, 0, -1, PieceKind::O);
        assert_eq!(grid.block(0, 0), Some(Block::Piece(PieceKind::O)));
        assert_eq!(grid.block(1, 0), Some(Block::Piece(PieceKind::O)));
        assert_eq!(grid.rows().flatten().filter(|b| !b.is_empty()).count(), 2);
    }

    #[test]
    fn test_clear_lines_none() {
        let mut grid = Grid::EMPTY;
        for x in 0..Grid::WIDTH - 1 {
            grid.set_block(x, 19, Block::Piece(PieceKind::I));
        }
        let before = grid.clone();
        assert_eq!(grid.clear_lines(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_lines_bottom_line() {
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 19, PieceKind::I);
        grid.set_block(3, 18, Block::Piece(PieceKind::S));
        assert_eq!(grid.clear_lines(), 1);
        assert_eq!(grid.block(3, 19), Some(Block::Piece(PieceKind::S)));
        assert_eq!(grid.block(3, 18), Some(Block::Empty));
    }

    #[test]
    fn test_clear_lines_adjacent_rows() {
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 17, PieceKind::I);
        fill_row(&mut grid, 18, PieceKind::O);
        fill_row(&mut grid, 19, PieceKind::T);
        grid.set_block(0, 16, Block::Piece(PieceKind::Z));
        assert_eq!(grid.clear_lines(), 3);
        assert_eq!(grid.block(0, 19), Some(Block::Piece(PieceKind::Z)));
        assert_eq!(grid.rows().flatten().filter(|b| !b.is_empty()).count(), 1);
    }

    #[test]
    fn test_clear_lines_separated_rows() {
        let mut grid = Grid::EMPTY;
        // Tag every row with a marker in column 0 and leave column 9 empty,
        // except rows 2 and 5 which are full.
        for y in 0..Grid::HEIGHT {
            let kind = PieceKind::ALL[y % PieceKind::LEN];
            grid.set_block(0, y, Block::Piece(kind));
        }
        fill_row(&mut grid, 2, PieceKind::I);
        fill_row(&mut grid, 5, PieceKind::I);
        let before = grid.clone();

        assert_eq!(grid.clear_lines(), 2);
        assert_eq!(grid.rows().count(), Grid::HEIGHT);

        // Two new empty rows on top.
        assert!(grid.rows().take(2).flatten().all(|b| b.is_empty()));
        // Rows 0, 1 shift down by two; rows 3, 4 by one; rows 6.. stay.
        let expected: Vec<_> = (0..Grid::HEIGHT)
            .filter(|y| *y != 2 && *y != 5)
            .map(|y| before.block(0, y))
            .collect();
        let actual: Vec<_> = (2..Grid::HEIGHT).map(|y| grid.block(0, y)).collect();
        assert_eq!(actual, expected);
        assert_eq!(grid.block(0, 3), before.block(0, 1));
        assert_eq!(grid.block(0, 5), before.block(0, 4));
        assert_eq!(grid.block(0, 6), before.block(0, 6));
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut grid = Grid::EMPTY;
        for y in 0..Grid::HEIGHT {
            fill_row(&mut grid, y, PieceKind::O);
        }
        assert_eq!(grid.clear_lines(), Grid::HEIGHT);
        assert!(grid.is_empty());
    }
}
