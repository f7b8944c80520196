pub mod base;
pub mod random;
pub mod target;

pub use crate::commands::giveaway::strategies::base::PickStrategy;
pub use crate::commands::giveaway::strategies::random::RandomPick;
pub use crate::commands::giveaway::strategies::target::TargetPick;
