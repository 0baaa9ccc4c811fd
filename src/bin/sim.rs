//! AI-vs-AI simulation driver.

use anyhow::bail;
use broadside::{Controller, GamePhase, GameSession, Hunter, Side};
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[derive(Parser)]
#[command(about = "Play computer-vs-computer battleship games")]
struct Args {
    /// Base RNG seed; game i uses seed + i.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: u64,
}

fn play(seed: u64) -> anyhow::Result<serde_json::Value> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = GameSession::new(
        Controller::Computer(Hunter::new()),
        Controller::Computer(Hunter::new()),
    );

    for side in [Side::One, Side::Two] {
        session.randomize_placement(side, &mut rng)?;
        session.finish_placement(side)?;
    }

    let mut shots = [0usize; 2];
    let mut turns = 0usize;
    let winner = loop {
        if let GamePhase::Over { winner } = session.phase() {
            break winner;
        }
        turns += 1;
        if turns > 1000 {
            bail!("game did not terminate");
        }
        let side = session.turn();
        let reports = session.run_computer_turn(side, &mut rng)?;
        shots[if side == Side::One { 0 } else { 1 }] += reports.len();
    };

    Ok(json!({
        "seed": seed,
        "winner": format!("{:?}", winner),
        "turns": turns,
        "shots": { "one": shots[0], "two": shots[1] },
    }))
}

fn main() -> anyhow::Result<()> {
    broadside::init_logging();
    let args = Args::parse();

    let mut games = Vec::new();
    for i in 0..args.games {
        games.push(play(args.seed + i)?);
    }

    println!("{}", serde_json::to_string_pretty(&json!(games))?);
    Ok(())
}
