use bot_lib::{BattleError, Bot, Context};

/// The hunted never aims at anybody. It keeps running ahead, sweeping the
/// next position for mines before stepping into it, and holds still when
/// somebody blocks the way.
#[derive(Default)]
pub struct Hunted;

impl Bot for Hunted {
    fn act(&mut self, context: &mut dyn Context) -> Result<(), BattleError> {
        let ahead = context.battlefield().my_position() + 1;
        match context.battlefield().who_is_at_position(ahead) {
            Some(bot) => {
                context.log(&format!("Bot {} is in the way, holding still.", bot));
                Ok(())
            },
            None => {
                context.battlefield().fire(ahead)?;
                context.battlefield().step()
            },
        }
    }

    fn name(&self) -> String {
        "hunted".into()
    }
}
