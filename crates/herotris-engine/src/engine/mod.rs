//! Game rules and state management.
//!
//! This module builds the game on top of the [`core`](crate::core) data
//! structures:
//!
//! - [`GameField`] - Single-turn state (grid, falling piece, next piece)
//! - [`GameSession`] - A complete game: tick/command state machine, score,
//!   drop interval and status
//! - [`GameStats`] - Score, locked pieces and line-clear histogram
//! - [`ScoringPolicy`] - Points per clear and drop-interval progression
//! - [`PieceBuffer`] - The one-piece preview queue
//! - [`PieceSource`] - Where piece kinds come from ([`RandomPieceSource`],
//!   [`SequencePieceSource`])
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally from a [`PieceSeed`]
//! 2. A driver calls [`GameSession::tick`] every
//!    [`GameSession::drop_interval`] and [`GameSession::apply_command`] on
//!    input
//! 3. A piece that cannot fall further locks; full lines clear, score and
//!    speed are updated, and the next piece spawns
//! 4. When a spawned piece collides, the status becomes [`GameStatus::Over`]
//!    and only [`GameSession::reset`] has any effect
//!
//! # Example
//!
//! ```
//! use herotris_engine::{Command, GameSession, GameStatus, PieceSeed};
//!
//! let mut session = GameSession::with_seed(PieceSeed::from(7));
//!
//! while session.status() == GameStatus::Running {
//!     session.apply_command(Command::HardDrop);
//! }
//!
//! // Every piece lands in the middle four columns, so no row ever fills.
//! assert!(session.stats().completed_pieces() <= 20);
//! assert_eq!(session.score(), 0);
//! ```

pub use self::{
    game_field::*, game_session::*, game_stats::*, piece_buffer::*, piece_source::*, scoring::*,
};

mod game_field;
mod game_session;
mod game_stats;
mod piece_buffer;
mod piece_source;
mod scoring;
