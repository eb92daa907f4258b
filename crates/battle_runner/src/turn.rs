//! The per-turn window a bot gets onto the arena. Actions take effect
//! immediately, and are counted and recorded as they happen.

use std::fmt;

use bot_lib::{ActionType, BattleError, Battlefield, BotNumber, Context, Position};
use log::*;

use crate::battlefield::{Arena, StepOutcome};

pub const MAX_ACTIONS_PER_BOT: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Action {
    pub action_type: ActionType,
    pub target: Option<Position>,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(target) => write!(f, "{:?}@{}", self.action_type, target),
            None => write!(f, "{:?}", self.action_type),
        }
    }
}

/// Everything a bot did during its turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoveResult {
    pub bot_number: BotNumber,
    pub actions: Vec<Action>,
    pub messages: Vec<String>,
}

pub struct Turn<'a> {
    arena: &'a mut Arena,
    bot_number: BotNumber,
    number_of_bots: usize,
    last_known_position: Position,
    result: MoveResult,
}

impl<'a> Turn<'a> {
    pub fn new(
        arena: &'a mut Arena,
        bot_number: BotNumber,
        number_of_bots: usize,
    ) -> Result<Self, BattleError> {
        let last_known_position =
            arena.position_of(bot_number).ok_or(BattleError::BotDestroyed(bot_number))?;
        Ok(Self {
            arena,
            bot_number,
            number_of_bots,
            last_known_position,
            result: MoveResult { bot_number, actions: vec![], messages: vec![] },
        })
    }

    pub fn finish(self) -> MoveResult {
        self.result
    }

    /// Books an action against this turn's allowance, failing if the bot
    /// can't act anymore.
    fn take_action(
        &mut self,
        action_type: ActionType,
        target: Option<Position>,
    ) -> Result<(), BattleError> {
        if !self.arena.is_alive(self.bot_number) {
            return Err(BattleError::BotDestroyed(self.bot_number));
        }
        if self.result.actions.len() >= MAX_ACTIONS_PER_BOT {
            return Err(BattleError::ActionLimitExceeded { limit: MAX_ACTIONS_PER_BOT });
        }
        self.result.actions.push(Action { action_type, target });
        self.arena.record_action(self.bot_number, action_type);
        Ok(())
    }
}

impl Battlefield for Turn<'_> {
    fn size(&self) -> usize {
        self.arena.size()
    }

    fn my_position(&self) -> Position {
        self.arena.position_of(self.bot_number).unwrap_or(self.last_known_position)
    }

    fn fire(&mut self, position: Position) -> Result<(), BattleError> {
        let position = self.arena.wrap(position);
        self.take_action(ActionType::Fire, Some(position))?;
        match self.arena.fire(position) {
            Some(victim) if victim == self.bot_number => {
                info!("Bot {} shoots itself at {}.", victim, position)
            },
            Some(victim) => info!("Bot {} destroys bot {} at {}.", self.bot_number, victim, position),
            None => debug!("Bot {} fires at {}.", self.bot_number, position),
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), BattleError> {
        self.take_action(ActionType::Move, None)?;
        match self.arena.step(self.bot_number)? {
            StepOutcome::Moved(position) => {
                debug!("Bot {} walks into {}.", self.bot_number, position);
                self.last_known_position = position;
            },
            StepOutcome::Blocked(other) => {
                debug!("Bot {} bumps into bot {}.", self.bot_number, other)
            },
            StepOutcome::Detonated(position) => {
                info!("Bot {} steps on a mine at {}.", self.bot_number, position);
                self.last_known_position = position;
            },
        }
        Ok(())
    }

    fn mine(&mut self, position: Position) -> Result<(), BattleError> {
        let position = self.arena.wrap(position);
        self.take_action(ActionType::Mine, Some(position))?;
        if self.arena.mine(position) {
            debug!("Bot {} lays a mine at {}.", self.bot_number, position);
        } else {
            debug!("Bot {} fails to lay a mine at occupied {}.", self.bot_number, position);
        }
        Ok(())
    }

    fn who_is_at_position(&self, position: Position) -> Option<BotNumber> {
        self.arena.occupant(position)
    }
}

impl Context for Turn<'_> {
    fn battlefield(&mut self) -> &mut dyn Battlefield {
        self
    }

    fn bot_number(&self) -> BotNumber {
        self.bot_number
    }

    fn round(&self) -> u32 {
        self.arena.current_round()
    }

    fn number_of_bots(&self) -> usize {
        self.number_of_bots
    }

    fn log(&mut self, message: &str) {
        info!("[bot {}] {}", self.bot_number, message);
        self.result.messages.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bot_lib::Bot;
    use hunter::Hunter;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::battlefield::Cell;

    fn turn_for(arena: &mut Arena, bot: u32) -> Turn<'_> {
        Turn::new(arena, BotNumber(bot), 2).unwrap()
    }

    #[test]
    fn moving_updates_my_position() {
        let mut arena = Arena::from_str("_0___1").unwrap();
        let mut turn = turn_for(&mut arena, 0);
        assert_eq!(turn.my_position(), 1);
        turn.step().unwrap();
        assert_eq!(turn.my_position(), 2);
        assert_eq!(turn.finish().actions, vec![Action { action_type: ActionType::Move, target: None }]);
        assert_eq!(arena.field_representation(), "__0__1");
    }

    #[test]
    fn actions_wrap_around_the_ring() {
        let mut arena = Arena::from_str("1___0").unwrap();
        let mut turn = turn_for(&mut arena, 0);
        turn.fire(turn.my_position() + 1).unwrap();
        assert_eq!(turn.finish().actions[0].target, Some(0));
        assert_eq!(arena.living_bots(), vec![BotNumber(0)]);
    }

    #[test]
    fn limiting_actions_per_turn() {
        let mut arena = Arena::new(2).unwrap();
        let mut turn = turn_for(&mut arena, 1);
        for _ in 0..MAX_ACTIONS_PER_BOT {
            turn.fire(5).unwrap();
        }
        assert_eq!(
            turn.mine(5),
            Err(BattleError::ActionLimitExceeded { limit: MAX_ACTIONS_PER_BOT })
        );
        assert_eq!(turn.finish().actions.len(), MAX_ACTIONS_PER_BOT);
        assert_eq!(arena.history()[&BotNumber(1)].get(&ActionType::Mine), None);
        assert_eq!(arena.history()[&BotNumber(1)][&ActionType::Fire], 4);
    }

    #[test]
    fn destroyed_bots_cannot_act() {
        let mut arena = Arena::from_str("0*_1").unwrap();
        let mut turn = turn_for(&mut arena, 0);
        turn.step().unwrap();
        assert_eq!(turn.my_position(), 1);
        assert_eq!(turn.fire(3), Err(BattleError::BotDestroyed(BotNumber(0))));
        assert!(Turn::new(&mut arena, BotNumber(0), 2).is_err());
    }

    #[test]
    fn queries_are_free() {
        let mut arena = Arena::from_str("0_1").unwrap();
        let turn = turn_for(&mut arena, 0);
        for position in 0..10 {
            turn.who_is_at_position(position);
        }
        assert_eq!(turn.who_is_at_position(5), Some(BotNumber(1)));
        assert!(turn.finish().actions.is_empty());
    }

    #[test]
    fn displaying_actions() {
        let fire = Action { action_type: ActionType::Fire, target: Some(3) };
        let step = Action { action_type: ActionType::Move, target: None };
        assert_eq!(fire.to_string(), "Fire@3");
        assert_eq!(step.to_string(), "Move");
    }

    #[test]
    fn logging_keeps_messages() {
        let mut arena = Arena::new(1).unwrap();
        let mut turn = turn_for(&mut arena, 0);
        turn.log("Just firing for fun.");
        assert_eq!(turn.finish().messages, vec!["Just firing for fun."]);
    }

    const HUNTING_GROUND: &str = "_0_____________________1";

    /// First seed whose single draw over the hunting ground satisfies `wanted`.
    fn seed_drawing(wanted: impl Fn(Position) -> bool) -> u64 {
        let size = HUNTING_GROUND.len();
        (0..).find(|seed| wanted(StdRng::seed_from_u64(*seed).gen_range(0..size))).unwrap()
    }

    fn hunt(seed: u64) -> (Arena, Result<(), BattleError>, MoveResult) {
        let mut arena = Arena::from_str(HUNTING_GROUND).unwrap();
        let mut turn = turn_for(&mut arena, 0);
        let result = Hunter::seeded(seed).act(&mut turn);
        let move_result = turn.finish();
        (arena, result, move_result)
    }

    fn listed(move_result: &MoveResult) -> Vec<String> {
        move_result.actions.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn the_hunter_mines_where_it_stood_before_moving() {
        // The hunter stands on 1 and steps into 2, so any other draw misses it.
        let (arena, result, move_result) = hunt(seed_drawing(|target| target != 2));

        assert_eq!(result, Ok(()));
        let action_types: Vec<ActionType> =
            move_result.actions.iter().map(|a| a.action_type).collect();
        assert_eq!(
            action_types,
            vec![ActionType::Fire, ActionType::Move, ActionType::Fire, ActionType::Mine]
        );
        assert_eq!(listed(&move_result)[3], "Mine@1");
        assert_eq!(arena.cell(1), Cell::Mine);
        assert_eq!(arena.position_of(BotNumber(0)), Some(2));
        assert_eq!(move_result.messages.len(), 1);
    }

    #[test]
    fn the_hunter_can_shoot_itself() {
        let (arena, result, move_result) = hunt(seed_drawing(|target| target == 2));

        assert_eq!(result, Err(BattleError::BotDestroyed(BotNumber(0))));
        assert_eq!(listed(&move_result), vec!["Fire@2", "Move", "Fire@2"]);
        assert_eq!(move_result.messages, vec!["OK, let's commit suicide!"]);
        assert!(!arena.is_alive(BotNumber(0)));
        assert_eq!(arena.cell(1), Cell::Empty);
    }
}
