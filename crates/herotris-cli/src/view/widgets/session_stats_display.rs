use std::iter;

use herotris_engine::{GameSession, PieceSource};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

pub struct SessionStatsDisplay<'a, S> {
    session: &'a GameSession<S>,
    block: Option<BlockWidget<'a>>,
}

impl<'a, S> SessionStatsDisplay<'a, S>
where
    S: PieceSource,
{
    pub fn new(session: &'a GameSession<S>) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROW_COUNT as u16 + super::block_vertical_margin(self.block.as_ref())
    }

    fn rows(&self) -> [Row; ROW_COUNT] {
        let session = self.session;
        let stats = session.stats();
        let counter = stats.line_cleared_counter();
        [
            Row::FullLabel("SCORE:"),
            Row::FullValue(stats.score().to_string()),
            Row::Empty,
            Row::LabelValue("LINES:", stats.total_cleared_lines().to_string()),
            Row::LabelValue("PIECES:", stats.completed_pieces().to_string()),
            Row::LabelValue(
                "SPEED:",
                format!("{}ms", session.drop_interval().as_millis()),
            ),
            Row::Empty,
            Row::LabelValue("SINGLES:", counter[1].to_string()),
            Row::LabelValue("DOUBLES:", counter[2].to_string()),
            Row::LabelValue("TRIPLES:", counter[3].to_string()),
            Row::LabelValue("QUADS:", counter[4].to_string()),
        ]
    }
}

const ROW_COUNT: usize = 11;

enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(String),
    LabelValue(&'static str, String),
}

impl<S> Widget for SessionStatsDisplay<'_, S>
where
    S: PieceSource,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROW_COUNT).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(self.rows(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value, style).right_aligned().render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value, style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
