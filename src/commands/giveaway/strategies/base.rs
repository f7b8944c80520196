use crate::commands::giveaway::models::Entrant;
use crate::error::Result;

// Determines how a winner is selected from the entry pool. The manager
// removes the entrant at the returned index from `entries` and appends it
// to `winners` under the giveaway lock.
pub trait PickStrategy: Send + Sync {
    // Returns the index of the winning entrant within the current pool.
    fn pick(&self, entries: &[Entrant]) -> Result<usize>;
}
