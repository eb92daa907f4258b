//! Runs the rounds of a battle: every round, each bot still standing gets
//! exactly one turn, in bot number order.

use std::{collections::BTreeMap, time::Instant};

use anyhow::Result;
use bot_lib::{Bot, BotNumber};
use log::*;

use crate::{battlefield::Arena, stats::BattleStats, turn::Turn};

pub trait BattleStatsListener {
    fn on_battle_stats_update(&mut self, battle_stats: &BattleStats);
}

impl<F: FnMut(&BattleStats)> BattleStatsListener for F {
    fn on_battle_stats_update(&mut self, battle_stats: &BattleStats) {
        self(battle_stats)
    }
}

struct Entrant {
    number: BotNumber,
    bot: Box<dyn Bot>,
}

pub struct Battle {
    number_of_rounds: u32,
    entrants: Vec<Entrant>,
    arena: Arena,
    start_time: Instant,
}

impl Battle {
    /// Bots are numbered in the order they are given.
    pub fn new(number_of_rounds: u32, bots: Vec<Box<dyn Bot>>) -> Result<Self> {
        let arena = Arena::new(bots.len())?;
        let entrants = bots
            .into_iter()
            .enumerate()
            .map(|(i, bot)| Entrant { number: BotNumber(i as u32), bot })
            .collect();
        Ok(Self { number_of_rounds, entrants, arena, start_time: Instant::now() })
    }

    pub fn execute(&mut self, listener: &mut dyn BattleStatsListener) {
        self.start_time = Instant::now();
        for _ in 0..self.number_of_rounds {
            if self.is_over() {
                break;
            }
            self.call_all_bots();
            listener.on_battle_stats_update(&self.current_battle_stats());
        }
        match self.arena.winner() {
            Some(winner) => info!("Bot {} owns the battlefield.", winner),
            None => info!("The battle ends without a winner."),
        }
    }

    /// Whether at most one bot is left standing.
    pub fn is_over(&self) -> bool {
        self.arena.is_owned() || self.arena.living_bots().is_empty()
    }

    fn call_all_bots(&mut self) {
        let round = self.arena.next_round();
        debug!("Calling all bots for round {}", round);
        let number_of_bots = self.entrants.len();
        let arena = &mut self.arena;
        for Entrant { number, bot } in self.entrants.iter_mut() {
            let mut turn = match Turn::new(arena, *number, number_of_bots) {
                Ok(turn) => turn,
                Err(_) => continue,
            };
            if let Err(e) = bot.act(&mut turn) {
                warn!("Bot {} ({}) ended its turn early: {}", number, bot.name(), e);
            }
            let result = turn.finish();
            let actions: Vec<String> = result.actions.iter().map(ToString::to_string).collect();
            debug!(
                "Move result for bot {}: [{}], {} message(s)",
                result.bot_number,
                actions.join(", "),
                result.messages.len()
            );
        }
        debug!("End of round {}: {}", round, arena.field_representation());
    }

    pub fn current_battle_stats(&self) -> BattleStats {
        let bots: BTreeMap<BotNumber, String> =
            self.entrants.iter().map(|e| (e.number, e.bot.name())).collect();
        BattleStats::calculate(self.start_time.elapsed(), bots, &self.arena)
    }
}
