use std::{collections::BTreeMap, fmt, time::Duration};

use bot_lib::{ActionType, BotNumber};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::battlefield::{Arena, History};

/// Snapshot of a battle, taken after every round.
#[derive(Clone, Debug, Serialize)]
pub struct BattleStats {
    pub elapsed_ms: u64,
    pub number_of_bots: usize,
    pub bots: BTreeMap<BotNumber, String>,
    pub winner: Option<BotNumber>,
    pub rounds: u32,
    pub history: History,
    pub battlefield: String,
}

impl BattleStats {
    pub fn calculate(elapsed: Duration, bots: BTreeMap<BotNumber, String>, arena: &Arena) -> Self {
        Self {
            elapsed_ms: elapsed.as_millis() as u64,
            number_of_bots: bots.len(),
            bots,
            winner: arena.winner(),
            rounds: arena.current_round(),
            history: arena.history().clone(),
            battlefield: arena.field_representation(),
        }
    }

    /// Action counts of all bots together. Every action type is present.
    pub fn summed_up_history(&self) -> BTreeMap<ActionType, u32> {
        let mut summed: BTreeMap<ActionType, u32> = ActionType::iter().map(|a| (a, 0)).collect();
        for (action_type, count) in self.history.values().flatten() {
            *summed.entry(*action_type).or_default() += count;
        }
        summed
    }

    fn bot_label(&self, bot: BotNumber) -> String {
        match self.bots.get(&bot) {
            Some(name) => format!("Bot {} ({})", bot, name),
            None => format!("Bot {}", bot),
        }
    }
}

fn write_counts<'a>(
    f: &mut fmt::Formatter<'_>,
    counts: impl IntoIterator<Item = (&'a ActionType, &'a u32)>,
) -> fmt::Result {
    let counts: Vec<String> =
        counts.into_iter().map(|(action_type, count)| format!("{:?}={}", action_type, count)).collect();
    write!(f, "{}", counts.join(" "))
}

impl fmt::Display for BattleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "***************************")?;
        writeln!(f, "Time passed: {} ms.", self.elapsed_ms)?;
        writeln!(f, "Number of bots: {}", self.number_of_bots)?;
        match self.winner {
            Some(winner) => writeln!(f, "Winner: {}", self.bot_label(winner))?,
            None => writeln!(f, "Winner: Nobody")?,
        }
        writeln!(f, "Rounds: {}", self.rounds)?;
        writeln!(f, "History:")?;
        for (bot, counts) in &self.history {
            write!(f, "  {}: ", self.bot_label(*bot))?;
            write_counts(f, counts)?;
            writeln!(f)?;
        }
        write!(f, "Summed up history: ")?;
        write_counts(f, &self.summed_up_history())?;
        writeln!(f)?;
        writeln!(f, "Final Battlefield: {}", self.battlefield)?;
        write!(f, "***************************")
    }
}
