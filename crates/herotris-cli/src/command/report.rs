use std::fmt;

use herotris_engine::{GameSession, GameStats, GameStatus, PieceSeed, PieceSource};
use serde::Serialize;

/// Final state of one game, printed when a game ends.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GameReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
    pub status: GameStatus,
    pub drop_interval_ms: u64,
    #[serde(flatten)]
    pub stats: GameStats,
}

impl GameReport {
    pub fn new<S>(session: &GameSession<S>, seed: Option<PieceSeed>) -> Self
    where
        S: PieceSource,
    {
        Self {
            game: None,
            seed,
            status: session.status(),
            drop_interval_ms: u64::try_from(session.drop_interval().as_millis())
                .unwrap_or(u64::MAX),
            stats: session.stats().clone(),
        }
    }

    pub fn game(self, game: usize) -> Self {
        Self {
            game: Some(game),
            ..self
        }
    }
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        let status = match self.status {
            GameStatus::Running => "quit",
            GameStatus::Over => "game over",
        };
        writeln!(f, "Result:     {status}")?;
        if let Some(seed) = self.seed {
            writeln!(f, "Seed:       {seed}")?;
        }
        writeln!(f, "Score:      {}", stats.score())?;
        writeln!(f, "Lines:      {}", stats.total_cleared_lines())?;
        writeln!(f, "Pieces:     {}", stats.completed_pieces())?;
        writeln!(f, "Interval:   {}ms", self.drop_interval_ms)?;
        let counter = stats.line_cleared_counter();
        write!(
            f,
            "Clears:     {} single / {} double / {} triple / {} quad",
            counter[1], counter[2], counter[3], counter[4]
        )
    }
}
