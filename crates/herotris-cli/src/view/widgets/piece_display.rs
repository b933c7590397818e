use herotris_engine::{PieceKind, RenderBlock};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::{
    hero,
    widgets::{BlockDisplay, style},
};

/// Preview of a single piece in its spawn orientation, captioned with its
/// hero's name.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        // wide enough for the longest hero name
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        // two rows of cells, a spacer and the caption
        2 * BlockDisplay::height() + 2 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();

        let [cells_area, _, caption_area] = Layout::vertical([
            Constraint::Length(2 * BlockDisplay::height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let cols = u16::try_from(shape.width()).unwrap_or(u16::MAX);
        let rows = u16::try_from(shape.height()).unwrap_or(u16::MAX);
        let piece_area = cells_area.centered(
            Constraint::Length(cols * BlockDisplay::width()),
            Constraint::Length(rows * BlockDisplay::height()),
        );

        let horizontal =
            Layout::horizontal((0..cols).map(|_| Constraint::Length(BlockDisplay::width())))
                .flex(Flex::Center);
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(BlockDisplay::height())));
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = BlockDisplay::from_render_block(RenderBlock::Locked(piece), false);
        let empty = BlockDisplay::from_render_block(RenderBlock::Empty, false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied(x, y) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }

        Line::styled(hero::hero(piece).name, style::DEFAULT)
            .centered()
            .render(caption_area, buf);
    }
}
