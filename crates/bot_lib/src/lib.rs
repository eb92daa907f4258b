pub mod error;
pub mod world;

pub use error::BattleError;
pub use world::{Battlefield, BotNumber, Context, Position};

// Reexports for quality of life when writing bots
pub use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

pub trait Bot {
    /// This method defines your bot. Every turn, you receive a context holding your
    /// view of the battlefield and must issue your actions through it. Any error
    /// coming back from the battlefield ends your turn; just hand it back with `?`.
    fn act(&mut self, context: &mut dyn Context) -> Result<(), BattleError>;
    /// Shown in the battle log and the final stats.
    fn name(&self) -> String;
}

/// Every side effect a bot can have on the battlefield during its turn.
#[derive(EnumIter, Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Move,
    Fire,
    Mine,
}
