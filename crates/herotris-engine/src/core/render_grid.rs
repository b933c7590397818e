use super::{
    grid::{Block, Grid},
    piece::Piece,
    shape::PieceKind,
};

/// A single cell of a [`RenderGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderBlock {
    #[default]
    Empty,
    /// Cell of a locked piece.
    Locked(PieceKind),
    /// Cell of the falling piece.
    Falling(PieceKind),
}

impl RenderBlock {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderBlock::Empty
    }

    /// Piece kind (and thus hero) shown in this cell, if any.
    #[must_use]
    pub fn piece_kind(self) -> Option<PieceKind> {
        match self {
            RenderBlock::Empty => None,
            RenderBlock::Locked(kind) | RenderBlock::Falling(kind) => Some(kind),
        }
    }
}

impl From<Block> for RenderBlock {
    fn from(block: Block) -> Self {
        match block {
            Block::Empty => RenderBlock::Empty,
            Block::Piece(kind) => RenderBlock::Locked(kind),
        }
    }
}

/// Display copy of the grid with the falling piece overlaid.
///
/// Building a `RenderGrid` never touches the committed [`Grid`]; it is a
/// snapshot for front ends.
///
/// # Example
///
/// ```
/// use herotris_engine::{Grid, Piece, PieceKind, RenderBlock, RenderGrid};
///
/// let grid = Grid::EMPTY;
/// let piece = Piece::new(PieceKind::O);
/// let render = RenderGrid::new(&grid, Some(&piece));
///
/// assert_eq!(render.block(4, 0), Some(RenderBlock::Falling(PieceKind::O)));
/// assert!(grid.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderGrid {
    rows: [[RenderBlock; Grid::WIDTH]; Grid::HEIGHT],
}

impl RenderGrid {
    /// Copies `grid` and overlays the occupied cells of `falling_piece` that
    /// lie inside the grid.
    #[must_use]
    pub fn new(grid: &Grid, falling_piece: Option<&Piece>) -> Self {
        let mut rows = [[RenderBlock::Empty; Grid::WIDTH]; Grid::HEIGHT];
        for (render_row, row) in rows.iter_mut().zip(grid.rows()) {
            for (cell, block) in render_row.iter_mut().zip(row) {
                *cell = RenderBlock::from(*block);
            }
        }

        if let Some(piece) = falling_piece {
            for (x, y) in piece.occupied_positions() {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = RenderBlock::Falling(piece.kind());
                }
            }
        }

        Self { rows }
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderBlock; Grid::WIDTH]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn block(&self, x: usize, y: usize) -> Option<RenderBlock> {
        self.rows.get(y)?.get(x).copied()
    }
}
