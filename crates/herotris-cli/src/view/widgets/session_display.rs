use herotris_engine::{GameSession, PieceSource};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// Full game view: board in the middle, statistics on the left, next piece
/// on the right, and a banner while paused or after game over.
#[derive(Debug)]
pub struct SessionDisplay<'a, S> {
    session: &'a GameSession<S>,
    paused: bool,
    horizontal_padding: u16,
}

impl<'a, S> SessionDisplay<'a, S>
where
    S: PieceSource,
{
    pub fn new(session: &'a GameSession<S>) -> Self {
        Self {
            session,
            paused: false,
            horizontal_padding: 1,
        }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    fn banner(&self) -> Option<(&'static str, Style)> {
        if self.session.status().is_over() {
            Some(("GAME OVER!!", style::GAME_OVER))
        } else if self.paused {
            Some(("PAUSED", style::PAUSED))
        } else {
            None
        }
    }
}

impl<S> Widget for SessionDisplay<'_, S>
where
    S: PieceSource,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.session.status().is_over() {
            color::RED
        } else if self.paused {
            color::YELLOW
        } else {
            color::WHITE
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(self.horizontal_padding))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let render_grid = self.session.render_grid();
        let game_board = BoardDisplay::new(&render_grid).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let next_panel = PieceDisplay::new()
            .piece(self.session.next_piece())
            .block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(self.session).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        let banner = self.banner();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = banner {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
