use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Largest width or height a piece shape may have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Occupancy matrix of a piece in a single rotation state.
///
/// Shapes are immutable values: rotating a shape produces a new one, which may
/// have swapped width and height (e.g. the `I` piece is 4×1 and then 1×4).
///
/// The bounding box of a shape is always tight, meaning its first and last
/// rows and columns each contain at least one occupied cell. Cells outside
/// the `width × height` box are always unoccupied.
///
/// # Example
///
/// ```
/// use herotris_engine::Shape;
///
/// let shape = Shape::from_rows([[0, 1, 0], [1, 1, 1]]);
/// assert_eq!((shape.width(), shape.height()), (3, 2));
///
/// let rotated = shape.rotated_clockwise();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Builds a shape from rows of `0`/`1` cells.
    ///
    /// # Panics
    ///
    /// Panics if the shape is larger than [`MAX_SHAPE_SIZE`] in either
    /// direction, contains a value other than `0` or `1`, or has a bounding
    /// box that is not tight. When evaluated in a `const` item the panic is a
    /// compile-time error.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W >= 1 && W <= MAX_SHAPE_SIZE, "shape width out of range");
        assert!(H >= 1 && H <= MAX_SHAPE_SIZE, "shape height out of range");

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                match rows[y][x] {
                    0 => {}
                    1 => cells[y][x] = true,
                    _ => panic!("shape cells must be 0 or 1"),
                }
                x += 1;
            }
            y += 1;
        }

        let shape = Self {
            width: W as u8,
            height: H as u8,
            cells,
        };
        assert!(shape.is_tight(), "shape bounding box must be tight");
        shape
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Coordinates outside the bounding box are reported as unoccupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Returns the `(x, y)` offsets of every occupied cell, row by row.
    pub fn occupied_cells(self) -> impl Iterator<Item = (i32, i32)> {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.cells[usize::from(y)][usize::from(x)])
                .map(move |x| (i32::from(x), i32::from(y)))
        })
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Returns this shape rotated by 90° clockwise.
    ///
    /// The new matrix satisfies `rotated[i][j] == self[height - 1 - j][i]`
    /// (transpose, then reverse the row order of the original). Applying the
    /// rotation four times yields the original shape.
    #[must_use]
    pub const fn rotated_clockwise(&self) -> Self {
        let rows = self.height as usize;
        let cols = self.width as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut i = 0;
        while i < cols {
            let mut j = 0;
            while j < rows {
                cells[i][j] = self.cells[rows - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Returns the distinct rotation states reachable by clockwise rotation,
    /// starting with `self`.
    ///
    /// Symmetric pieces yield fewer than four states (one for `O`, two for
    /// `I`, `S` and `Z`).
    #[must_use]
    pub fn rotations(&self) -> ArrayVec<Self, 4> {
        let mut rotations = ArrayVec::new();
        let mut shape = *self;
        for _ in 0..4 {
            if !rotations.contains(&shape) {
                rotations.push(shape);
            }
            shape = shape.rotated_clockwise();
        }
        rotations
    }

    const fn is_tight(&self) -> bool {
        let w = self.width as usize;
        let h = self.height as usize;
        self.row_has_cell(0)
            && self.row_has_cell(h - 1)
            && self.col_has_cell(0)
            && self.col_has_cell(w - 1)
    }

    const fn row_has_cell(&self, y: usize) -> bool {
        let mut x = 0;
        while x < self.width as usize {
            if self.cells[y][x] {
                return true;
            }
            x += 1;
        }
        false
    }

    const fn col_has_cell(&self, x: usize) -> bool {
        let mut y = 0;
        while y < self.height as usize {
            if self.cells[y][x] {
                return true;
            }
            y += 1;
        }
        false
    }
}

/// The piece catalog.
///
/// Every kind is bound to one hero; the discriminant is the hero index used by
/// front ends to pick a name, symbol and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// T-piece (hero 0, Thor).
    T = 0,
    /// I-piece (hero 1, Iron Man).
    I = 1,
    /// O-piece (hero 2, Captain America).
    O = 2,
    /// S-piece (hero 3, Black Widow).
    S = 3,
    /// Z-piece (hero 4, Hulk).
    Z = 4,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds in the catalog.
    pub const LEN: usize = 5;

    /// All kinds, ordered by hero index.
    pub const ALL: [Self; Self::LEN] = [Self::T, Self::I, Self::O, Self::S, Self::Z];

    /// Index of the hero this piece is rendered as.
    #[must_use]
    pub const fn hero_index(self) -> usize {
        self as usize
    }

    /// Returns the kind bound to `hero_index`, if any.
    #[must_use]
    pub const fn from_hero_index(hero_index: usize) -> Option<Self> {
        if hero_index < Self::LEN {
            Some(Self::ALL[hero_index])
        } else {
            None
        }
    }

    /// Base (spawn) shape of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize][0]
    }

    pub(crate) const fn rotated_shape(self, rotation: usize) -> Shape {
        PIECE_SHAPES[self as usize][rotation % 4]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use herotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::T => 'T',
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// ```
    /// use herotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('L'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'T' => Some(PieceKind::T),
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Generates the 4 rotation states of a shape by repeated clockwise rotation.
const fn shape_rotations(shape: Shape) -> [Shape; 4] {
    let mut rotations = [shape; 4];
    let mut i = 1;
    while i < 4 {
        rotations[i] = rotations[i - 1].rotated_clockwise();
        i += 1;
    }
    rotations
}

// Indexed by hero index, then rotation state.
const PIECE_SHAPES: [[Shape; 4]; PieceKind::LEN] = [
    shape_rotations(Shape::from_rows([[0, 1, 0], [1, 1, 1]])),
    shape_rotations(Shape::from_rows([[1, 1, 1, 1]])),
    shape_rotations(Shape::from_rows([[1, 1], [1, 1]])),
    shape_rotations(Shape::from_rows([[0, 1, 1], [1, 1, 0]])),
    shape_rotations(Shape::from_rows([[1, 1, 0], [0, 1, 1]])),
];
