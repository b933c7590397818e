pub use self::{grid::*, piece::*, render_grid::*, shape::*};

pub(crate) mod grid;
pub(crate) mod piece;
pub(crate) mod render_grid;
pub(crate) mod shape;
