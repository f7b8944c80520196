use rand::Rng;

use crate::commands::giveaway::models::Entrant;
use crate::commands::giveaway::strategies::base::PickStrategy;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct RandomPick;

impl RandomPick {
    pub fn new() -> Self {
        RandomPick {}
    }
}

impl PickStrategy for RandomPick {
    fn pick(&self, entries: &[Entrant]) -> Result<usize> {
        match entries.is_empty() {
            true => Err(Error::Giveaway("No entries to pick from.".to_string())),
            false => Ok(rand::thread_rng().gen_range(0..entries.len())),
        }
    }
}
