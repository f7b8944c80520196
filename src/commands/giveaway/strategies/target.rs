use crate::commands::giveaway::models::Entrant;
use crate::commands::giveaway::parser::PickTarget;
use crate::commands::giveaway::strategies::base::PickStrategy;
use crate::error::{Error, Result};

// Picks the entrant named by the admin instead of rolling the dice.
// Usernames are matched case-insensitively since Telegram treats them so.
#[derive(Debug)]
pub struct TargetPick {
    target: PickTarget,
}

impl TargetPick {
    pub fn new(target: PickTarget) -> Self {
        TargetPick { target }
    }
}

impl PickStrategy for TargetPick {
    fn pick(&self, entries: &[Entrant]) -> Result<usize> {
        let position = entries.iter().position(|entrant| match &self.target {
            PickTarget::UserId(user_id) => entrant.user_id == *user_id,
            PickTarget::Username(name) => entrant.username.eq_ignore_ascii_case(name),
        });

        match position {
            Some(index) => Ok(index),
            None => Err(Error::Giveaway(format!("No entry for {}.", self.target))),
        }
    }
}
