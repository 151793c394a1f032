//! Headless automated-vs-automated battle.
//!
//! Set `RUST_LOG=debug` for the engine's own trace.

use std::process::ExitCode;

use clap::Parser;
use waifu_tactics::{BattleConfig, BattleSession, SideId};

#[derive(Parser, Debug)]
#[command(name = "simulate", version, about = "Run one fully automated battle")]
struct Args {
    /// Seed for catalog generation and every combat roll
    #[arg(default_value_t = 42)]
    seed: u64,
    /// Stop after this many combat turns
    #[arg(default_value_t = 10_000)]
    max_turns: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut session = match BattleSession::new(BattleConfig::default(), args.seed) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("bad config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let winner = match session.run_to_completion(args.max_turns) {
        Ok(winner) => winner,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    for event in session.events() {
        println!("{event}");
    }

    println!();
    for side in SideId::both() {
        let player = session.player(side);
        let alive = player.living_units().count();
        println!(
            "{} ({side}): {alive}/{} standing, {} production points",
            player.name,
            player.units().len(),
            player.production_points()
        );
    }

    match winner {
        Some(side) => println!(
            "{} wins in {} turns",
            session.player(side).name,
            session.turns_taken()
        ),
        None => println!("no winner after {} turns", session.turns_taken()),
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["simulate"]).unwrap();
        assert_eq!(args.seed, 42);
        assert_eq!(args.max_turns, 10_000);
    }

    #[test]
    fn test_positional_overrides() {
        let args = Args::try_parse_from(["simulate", "7", "500"]).unwrap();
        assert_eq!(args.seed, 7);
        assert_eq!(args.max_turns, 500);
        assert!(Args::try_parse_from(["simulate", "not-a-seed"]).is_err());
    }
}
