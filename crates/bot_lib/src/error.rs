use thiserror::Error;

use crate::world::BotNumber;

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum BattleError {
    #[error("No more than {limit} actions are allowed per turn")]
    ActionLimitExceeded { limit: usize },

    #[error("Bot {0} has been destroyed and can't act anymore")]
    BotDestroyed(BotNumber),
}
