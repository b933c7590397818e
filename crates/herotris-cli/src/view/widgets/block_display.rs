use herotris_engine::RenderBlock;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::{hero, widgets::style};

/// A single grid cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_render_block(block: RenderBlock, show_dots: bool) -> Self {
        match block {
            RenderBlock::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            RenderBlock::Empty => Self::new(style::EMPTY, ""),
            RenderBlock::Locked(kind) => {
                let hero = hero::hero(kind);
                Self::new(style::locked(hero.color), hero.tag)
            }
            RenderBlock::Falling(kind) => {
                let hero = hero::hero(kind);
                Self::new(style::falling(hero.color), hero.tag)
            }
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
