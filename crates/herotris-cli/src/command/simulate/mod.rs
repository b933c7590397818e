use std::io::{self, Write as _};

use herotris_engine::{GameSession, PieceSeed, RandomPieceSource, ScoringPolicy};
use rand::Rng as _;

use super::{ScoringArg, report::GameReport};

mod placer;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed of the first game (32 hex digits); each further game uses the
    /// next seed. Random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Number of games to play
    #[clap(long, default_value_t = 1)]
    games: usize,
    /// Stop a game after this many pieces even if it has not topped out
    #[clap(long, default_value_t = 1000)]
    max_pieces: usize,
    #[clap(flatten)]
    scoring: ScoringArg,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        games,
        max_pieces,
        scoring,
    } = arg;

    let policy = scoring.to_policy()?;
    let base_seed = seed.unwrap_or_else(|| rand::rng().random());

    let mut out = io::stdout().lock();
    for (game, offset) in (0..*games).zip(0_u128..) {
        let seed = PieceSeed::from(u128::from(base_seed).wrapping_add(offset));
        let session = simulate_game(seed, policy, *max_pieces);
        let report = GameReport::new(&session, Some(seed)).game(game);
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Plays one game with the greedy placer until it tops out or `max_pieces`
/// pieces are locked.
fn simulate_game(seed: PieceSeed, policy: ScoringPolicy, max_pieces: usize) -> GameSession {
    let mut session = GameSession::with_source(RandomPieceSource::with_seed(seed), policy);
    while session.stats().completed_pieces() < max_pieces {
        let Some(plan) = placer::best_plan(&session) else {
            break;
        };
        for command in plan {
            session.apply_command(command);
        }
    }
    session
}
