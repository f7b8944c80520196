use std::path::PathBuf;
use std::sync::Mutex;

use tracing::info;

use crate::commands::giveaway::models::{Entrant, EntryOutcome, GiveawayState};
use crate::commands::giveaway::strategies::PickStrategy;
use crate::error::Result;
use crate::storage::JsonStore;

// Owner of the persisted giveaway document. Every read-modify-write of
// entries and winners runs under the single process-wide lock; the state
// is re-read from disk for each operation and rewritten wholesale.
#[derive(Debug)]
#[non_exhaustive]
pub struct GiveawayManager {
    store: JsonStore<GiveawayState>,
    lock: Mutex<()>,
}

impl GiveawayManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GiveawayManager {
            store: JsonStore::new(path),
            lock: Mutex::new(()),
        }
    }

    // Reads the current state under the lock.
    pub fn snapshot(&self) -> GiveawayState {
        let _guard = self.lock.lock().unwrap();
        self.store.load_or_default()
    }

    // Reads the current state without taking the lock. Used by the
    // announcer loop, which tolerates a value that is about to change.
    pub fn peek(&self) -> GiveawayState {
        self.store.load_or_default()
    }

    // Opens a fresh giveaway: entries and winners are cleared and the
    // active flag is raised, regardless of the previous state.
    pub fn start(&self) -> Result<GiveawayState> {
        let _guard = self.lock.lock().unwrap();
        let mut state = self.store.load_or_default();

        state.active = true;
        state.entries.clear();
        state.winners.clear();
        self.store.save(&state)?;
        info!("Giveaway started. Entries and winners cleared.");

        Ok(state)
    }

    // Closes the giveaway. Entries and winners stay as they are so that
    // winners can still be picked from the final pool.
    pub fn end(&self) -> Result<GiveawayState> {
        let _guard = self.lock.lock().unwrap();
        let mut state = self.store.load_or_default();

        state.active = false;
        self.store.save(&state)?;
        info!("Giveaway ended.");

        Ok(state)
    }

    pub fn clear_winners(&self) -> Result<GiveawayState> {
        let _guard = self.lock.lock().unwrap();
        let mut state = self.store.load_or_default();

        state.winners.clear();
        self.store.save(&state)?;
        info!("Winners list cleared.");

        Ok(state)
    }

    // Appends the user to the pool. Entering twice is idempotent: the
    // original entry number is reported and nothing is appended.
    pub fn enter(&self, entrant: Entrant) -> Result<EntryOutcome> {
        let _guard = self.lock.lock().unwrap();
        let mut state = self.store.load_or_default();

        if !state.active {
            return Ok(EntryOutcome::Inactive);
        }

        if let Some(position) = state
            .entries
            .iter()
            .position(|existing| existing.user_id == entrant.user_id)
        {
            return Ok(EntryOutcome::AlreadyEntered(position + 1));
        }

        state.entries.push(entrant);
        self.store.save(&state)?;

        Ok(EntryOutcome::Entered(state.entries.len()))
    }

    // Moves the entrant selected by the strategy from the entry pool to
    // the winners list and returns it.
    pub fn pick(&self, strategy: &dyn PickStrategy) -> Result<Entrant> {
        let _guard = self.lock.lock().unwrap();
        let mut state = self.store.load_or_default();

        let index = strategy.pick(&state.entries)?;
        let winner = state.entries.remove(index);
        state.winners.push(winner.clone());
        self.store.save(&state)?;

        Ok(winner)
    }
}
