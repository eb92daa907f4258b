//! The shared arena: a ring of cells holding bots and mines, plus the
//! bookkeeping of what every bot has done so far.

use std::{collections::BTreeMap, convert::TryFrom, str::FromStr};

use anyhow::{anyhow, Result};
use bot_lib::{ActionType, BattleError, BotNumber, Position};

/// Every bot gets this many cells of the battlefield to itself at the start.
pub const SPACE_PER_BOT: usize = 20;

const EMPTY_REPRESENTATION: char = '_';
const MINE_REPRESENTATION: char = '*';
const BOT_RADIX: u32 = 36;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Bot(BotNumber),
    Mine,
}

/// What became of a bot trying to step forward.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    Moved(Position),
    Blocked(BotNumber),
    /// Stepped on a mine at the given position and didn't survive it.
    Detonated(Position),
}

pub type History = BTreeMap<BotNumber, BTreeMap<ActionType, u32>>;

pub struct Arena {
    cells: Vec<Cell>,
    round: u32,
    history: History,
}

impl Arena {
    /// Spreads the bots evenly over a battlefield sized to fit them all.
    pub fn new(number_of_bots: usize) -> Result<Self> {
        if number_of_bots == 0 {
            return Err(anyhow!("A battle needs at least one bot"));
        }
        let mut cells = vec![Cell::Empty; number_of_bots * SPACE_PER_BOT];
        for bot in 0..number_of_bots {
            cells[bot * SPACE_PER_BOT] = Cell::Bot(BotNumber(bot as u32));
        }
        Ok(Self { cells, round: 0, history: BTreeMap::new() })
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Positions wrap around the ring, so any position maps to a cell.
    pub fn wrap(&self, position: Position) -> Position {
        position % self.size()
    }

    pub fn cell(&self, position: Position) -> Cell {
        self.cells[self.wrap(position)]
    }

    pub fn occupant(&self, position: Position) -> Option<BotNumber> {
        match self.cell(position) {
            Cell::Bot(bot) => Some(bot),
            _ => None,
        }
    }

    pub fn position_of(&self, bot: BotNumber) -> Option<Position> {
        self.cells.iter().position(|c| *c == Cell::Bot(bot))
    }

    /// Destroys whatever sits at the position. Returns the bot hit, if any.
    pub fn fire(&mut self, position: Position) -> Option<BotNumber> {
        let position = self.wrap(position);
        let hit = self.occupant(position);
        self.cells[position] = Cell::Empty;
        hit
    }

    pub fn step(&mut self, bot: BotNumber) -> Result<StepOutcome, BattleError> {
        let from = self.position_of(bot).ok_or(BattleError::BotDestroyed(bot))?;
        let to = self.wrap(from + 1);
        let outcome = match self.cells[to] {
            Cell::Bot(other) if other != bot => return Ok(StepOutcome::Blocked(other)),
            // A ring of one cell: the bot steps back onto itself.
            Cell::Bot(_) => return Ok(StepOutcome::Moved(to)),
            Cell::Mine => {
                self.cells[to] = Cell::Empty;
                StepOutcome::Detonated(to)
            },
            Cell::Empty => {
                self.cells[to] = Cell::Bot(bot);
                StepOutcome::Moved(to)
            },
        };
        self.cells[from] = Cell::Empty;
        Ok(outcome)
    }

    /// Lays a mine on an empty cell. Returns whether a mine was laid.
    pub fn mine(&mut self, position: Position) -> bool {
        let position = self.wrap(position);
        let is_empty = self.cells[position] == Cell::Empty;
        if is_empty {
            self.cells[position] = Cell::Mine;
        }
        is_empty
    }

    pub fn living_bots(&self) -> Vec<BotNumber> {
        let mut bots: Vec<BotNumber> = self
            .cells
            .iter()
            .filter_map(|c| match c {
                Cell::Bot(bot) => Some(*bot),
                _ => None,
            })
            .collect();
        bots.sort();
        bots
    }

    pub fn is_alive(&self, bot: BotNumber) -> bool {
        self.position_of(bot).is_some()
    }

    /// The last bot standing, if there is exactly one.
    pub fn winner(&self) -> Option<BotNumber> {
        match self.living_bots().as_slice() {
            [survivor] => Some(*survivor),
            _ => None,
        }
    }

    /// Whether this battle has already been won by some bot.
    pub fn is_owned(&self) -> bool {
        self.winner().is_some()
    }

    pub fn current_round(&self) -> u32 {
        self.round
    }

    pub fn next_round(&mut self) -> u32 {
        self.round += 1;
        self.round
    }

    pub fn record_action(&mut self, bot: BotNumber, action_type: ActionType) {
        *self.history.entry(bot).or_default().entry(action_type).or_default() += 1;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn field_representation(&self) -> String {
        self.cells.iter().map(|c| char::from(*c)).collect()
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => EMPTY_REPRESENTATION,
            Cell::Mine => MINE_REPRESENTATION,
            Cell::Bot(BotNumber(n)) => std::char::from_digit(n % BOT_RADIX, BOT_RADIX).unwrap_or('?'),
        }
    }
}

impl TryFrom<char> for Cell {
    type Error = anyhow::Error;

    fn try_from(character: char) -> Result<Self, Self::Error> {
        match character {
            EMPTY_REPRESENTATION => Ok(Cell::Empty),
            MINE_REPRESENTATION => Ok(Cell::Mine),
            c => c
                .to_digit(BOT_RADIX)
                .map(|n| Cell::Bot(BotNumber(n)))
                .ok_or_else(|| anyhow!("Invalid character for cell: {}", c)),
        }
    }
}

/// Builds an arbitrary layout from its field representation, e.g. `"0__*_1"`.
impl FromStr for Arena {
    type Err = anyhow::Error;

    fn from_str(text: &str) -> Result<Self> {
        let cells: Vec<Cell> = text.chars().map(Cell::try_from).collect::<Result<_>>()?;
        if cells.is_empty() {
            return Err(anyhow!("Battlefield must have at least one cell"));
        }
        let mut bots: Vec<BotNumber> = cells
            .iter()
            .filter_map(|c| match c {
                Cell::Bot(bot) => Some(*bot),
                _ => None,
            })
            .collect();
        bots.sort();
        if bots.windows(2).any(|w| w[0] == w[1]) {
            return Err(anyhow!("A bot can only stand in one place"));
        }
        Ok(Self { cells, round: 0, history: BTreeMap::new() })
    }
}
