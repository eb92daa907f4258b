//! Bots are compiled into the runner and enlisted by name.

use anyhow::{anyhow, Result};
use bot_lib::Bot;
use hunted::Hunted;
use hunter::Hunter;
use log::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const AVAILABLE_BOTS: &[&str] = &["hunter", "hunted"];
/// The hunter... and the hunted.
pub const DEFAULT_BOTS: &[&str] = &["hunter", "hunted"];

/// Builds the bots for a battle. Each one gets its own seed drawn from the
/// battle seed, so a whole battle replays identically for the same seed.
pub fn enlist<S: AsRef<str>>(names: &[S], seed: u64) -> Result<Vec<Box<dyn Bot>>> {
    let mut seeds = StdRng::seed_from_u64(seed);
    if names.is_empty() {
        info!("Using default bots.");
        DEFAULT_BOTS.iter().map(|name| recruit(name, seeds.gen())).collect()
    } else {
        names.iter().map(|name| recruit(name.as_ref(), seeds.gen())).collect()
    }
}

fn recruit(name: &str, seed: u64) -> Result<Box<dyn Bot>> {
    let bot: Box<dyn Bot> = match name {
        "hunter" => Box::new(Hunter::seeded(seed)),
        "hunted" => Box::new(Hunted),
        _ => {
            return Err(anyhow!(
                "Unknown bot \"{}\", choose from: {}",
                name,
                AVAILABLE_BOTS.join(", ")
            ))
        },
    };
    debug!("Enlisted {} with seed {:x}", name, seed);
    Ok(bot)
}
