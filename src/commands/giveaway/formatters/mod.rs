pub mod base;
pub mod roster;

pub use crate::commands::giveaway::formatters::base::RosterFormatter;
pub use crate::commands::giveaway::formatters::roster::{
    DefaultRosterFormatter, render_entries, render_winners,
};
