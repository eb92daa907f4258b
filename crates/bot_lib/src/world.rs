use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BattleError;

/// Index of a cell on the battlefield. The battlefield is a ring, so
/// positions past the last cell wrap back to the first.
pub type Position = usize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BotNumber(pub u32);

impl fmt::Display for BotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shared arena as seen by the bot currently acting.
pub trait Battlefield {
    /// Number of positions on the battlefield.
    fn size(&self) -> usize;
    fn my_position(&self) -> Position;
    /// Attack a position. Whatever is there, yourself included, is destroyed.
    fn fire(&mut self, position: Position) -> Result<(), BattleError>;
    /// Advance one step.
    fn step(&mut self) -> Result<(), BattleError>;
    /// Place a mine. Any bot stepping on it later is destroyed.
    fn mine(&mut self, position: Position) -> Result<(), BattleError>;
    fn who_is_at_position(&self, position: Position) -> Option<BotNumber>;
}

/// Per-turn handle given to a bot.
pub trait Context {
    fn battlefield(&mut self) -> &mut dyn Battlefield;
    fn bot_number(&self) -> BotNumber;
    /// Counted from 1 onwards.
    fn round(&self) -> u32;
    fn number_of_bots(&self) -> usize;
    fn log(&mut self, message: &str);
}
