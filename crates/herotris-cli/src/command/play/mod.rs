use herotris_engine::{GameSession, PieceSeed, RandomPieceSource};

use crate::tui::Runtime;

use self::app::PlayApp;
use super::{ScoringArg, report::GameReport};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Print the final statistics as JSON instead of text
    #[clap(long)]
    json: bool,
    #[clap(flatten)]
    scoring: ScoringArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        json,
        scoring,
    } = arg;

    let policy = scoring.to_policy()?;
    let source = seed.map_or_else(RandomPieceSource::new, RandomPieceSource::with_seed);
    let mut app = PlayApp::new(GameSession::with_source(source, policy));

    Runtime::new().run(&mut app)?;

    let report = GameReport::new(app.session(), *seed);
    if *json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
