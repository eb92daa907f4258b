use bot_lib::{BattleError, Bot, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The hunter clears the way ahead, steps into it, takes one shot at a random
/// position and leaves a mine behind where it used to stand.
pub struct Hunter {
    rng: StdRng,
}

impl Hunter {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl Bot for Hunter {
    fn act(&mut self, context: &mut dyn Context) -> Result<(), BattleError> {
        let me = context.bot_number();
        let my_position = context.battlefield().my_position();
        context.battlefield().fire(my_position + 1)?; // clear the way
        context.battlefield().step()?;

        let target = self.rng.gen_range(0..context.battlefield().size());
        let message = match context.battlefield().who_is_at_position(target) {
            Some(bot) if bot == me => "OK, let's commit suicide!".to_owned(),
            None => "Just firing for fun.".to_owned(),
            Some(bot) => format!("Aiming at bot {}.", bot),
        };
        context.log(&message);
        context.battlefield().fire(target)?;

        // Mine the position we were at, not the one we stepped into.
        context.battlefield().mine(my_position)
    }

    fn name(&self) -> String {
        "hunter".into()
    }
}
