use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Error};
use battle::Battle;
use clap::Parser;
use log::*;
use stats::BattleStats;

mod battle;
mod battlefield;
mod roster;
mod stats;
mod turn;

const DEFAULT_ROUNDS: u32 = 5;

/// Sends scripted bots into battle on a ring-shaped battlefield.
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
struct Args {
    /// Bots to send into battle, by name. Defaults to the hunter and the hunted.
    bots: Vec<String>,

    /// Maximum number of rounds before the battle is called off.
    #[arg(long, env = "BATTLE_ROUNDS", default_value_t = DEFAULT_ROUNDS)]
    rounds: u32,

    /// Seed for every random decision in the battle. Random if not given.
    #[arg(long, env = "BATTLE_SEED")]
    seed: Option<u64>,

    /// Where to write the final stats as JSON.
    #[arg(long, env = "BATTLE_STATS_FILE")]
    stats_file: Option<PathBuf>,
}

fn main() -> Result<(), Error> {
    let dotenv_result = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("{}", dotenv_status(&dotenv_result));
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Battle seed is {}.", seed);
    let bots = roster::enlist(args.bots.as_slice(), seed)?;
    let mut battle = Battle::new(args.rounds, bots)?;
    battle.execute(&mut display_battle_stats_update);

    let final_stats = battle.current_battle_stats();
    println!("{}", final_stats);
    if let Some(path) = args.stats_file {
        let json = serde_json::to_string_pretty(&final_stats)?;
        fs::write(&path, json).with_context(|| format!("writing stats to {:?}", path))?;
        info!("{:?} saved.", path);
    }
    Ok(())
}

fn dotenv_status(dotenv_result: &Result<PathBuf, dotenv::Error>) -> String {
    match dotenv_result {
        Ok(path) => format!("Loaded env variables from {:?}.", path),
        Err(e) => format!(
            "Loading .env file: {}. Copy .env.example to .env to conveniently set env variables.",
            e
        ),
    }
}

fn display_battle_stats_update(battle_stats: &BattleStats) {
    print!("\rround: {} | {}", battle_stats.rounds, battle_stats.battlefield);
    io::stdout().flush().ok();
}
