use std::time::Duration;

use clap::{Parser, Subcommand};
use herotris_engine::ScoringPolicy;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod report;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run games headlessly with a greedy placer and print statistics as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Scoring and speed settings shared by all modes.
#[derive(Debug, Clone, clap::Args)]
struct ScoringArg {
    /// Points for clearing a single line (n lines score n * n times this)
    #[clap(long, default_value_t = 100)]
    line_clear_base: usize,
    /// Drop interval at the start of a game, in milliseconds
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    initial_interval_ms: u64,
    /// Lower bound of the drop interval, in milliseconds
    #[clap(long, default_value_t = 200, value_parser = clap::value_parser!(u64).range(1..))]
    min_interval_ms: u64,
    /// Drop interval decrease per cleared line, in milliseconds
    #[clap(long, default_value_t = 50)]
    interval_step_ms: u64,
}

impl Default for ScoringArg {
    fn default() -> Self {
        Self::from(&ScoringPolicy::default())
    }
}

impl From<&ScoringPolicy> for ScoringArg {
    fn from(policy: &ScoringPolicy) -> Self {
        let millis = |duration: Duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self {
            line_clear_base: policy.line_clear_base,
            initial_interval_ms: millis(policy.initial_drop_interval),
            min_interval_ms: millis(policy.min_drop_interval),
            interval_step_ms: millis(policy.drop_interval_step),
        }
    }
}

impl ScoringArg {
    fn to_policy(&self) -> anyhow::Result<ScoringPolicy> {
        anyhow::ensure!(
            self.min_interval_ms <= self.initial_interval_ms,
            "--min-interval-ms ({}) must not exceed --initial-interval-ms ({})",
            self.min_interval_ms,
            self.initial_interval_ms,
        );
        Ok(ScoringPolicy {
            line_clear_base: self.line_clear_base,
            initial_drop_interval: Duration::from_millis(self.initial_interval_ms),
            min_drop_interval: Duration::from_millis(self.min_interval_ms),
            drop_interval_step: Duration::from_millis(self.interval_step_ms),
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_arg_matches_policy() {
        let policy = ScoringArg::default().to_policy().unwrap();
        assert_eq!(policy, ScoringPolicy::default());
    }

    #[test]
    fn test_rejects_min_above_initial() {
        let arg = ScoringArg {
            min_interval_ms: 2000,
            ..ScoringArg::default()
        };
        assert!(arg.to_policy().is_err());
    }

    #[test]
    fn test_rejects_invalid_seed() {
        assert!(CommandArgs::try_parse_from(["herotris", "play", "--seed", "xyz"]).is_err());
    }
}
