use std::time::{Duration, Instant};

use dashmap::DashMap;

// How long a pending conversation step stays valid. An entry older than
// this is treated as if the user never started the flow.
pub const CONVERSATION_TTL: Duration = Duration::from_secs(5 * 60);

// Transient per-user step of a multi-message flow. The idle state is the
// absence of an entry in the tracker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConversationState {
    // The next text message names the entrant to pick.
    AwaitingPickTarget,
    // Custom-button wizard, step 1 of 3.
    AwaitingButtonName,
    // Custom-button wizard, step 2 of 3.
    AwaitingButtonUrl { name: String },
    // Custom-button wizard, step 3 of 3, resolved by a button press.
    AwaitingButtonPlacement { name: String, url: String },
}

#[derive(Debug)]
struct TrackedState {
    state: ConversationState,
    updated_at: Instant,
}

// Keeps the conversation step per user id. Expired entries are dropped
// lazily on the next lookup.
#[derive(Debug)]
pub struct ConversationTracker {
    states: DashMap<u64, TrackedState>,
    ttl: Duration,
}

impl ConversationTracker {
    pub fn new() -> Self {
        Self::with_ttl(CONVERSATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        ConversationTracker {
            states: DashMap::new(),
            ttl,
        }
    }

    pub fn set(&self, user_id: u64, state: ConversationState) {
        self.states.insert(
            user_id,
            TrackedState {
                state,
                updated_at: Instant::now(),
            },
        );
    }

    pub fn get(&self, user_id: u64) -> Option<ConversationState> {
        let (state, fresh) = {
            let entry = self.states.get(&user_id)?;
            (entry.state.clone(), entry.updated_at.elapsed() <= self.ttl)
        };

        match fresh {
            true => Some(state),
            false => {
                self.states.remove(&user_id);
                None
            }
        }
    }

    pub fn clear(&self, user_id: u64) {
        self.states.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use crate::conversation::{ConversationState, ConversationTracker};

    #[test]
    fn test_read_an_idle_user() {
        let tracker = ConversationTracker::new();

        assert_eq!(tracker.get(1), None);
    }

    #[test]
    fn test_set_and_get_a_state() {
        let tracker = ConversationTracker::new();

        tracker.set(1, ConversationState::AwaitingPickTarget);
        assert_eq!(tracker.get(1), Some(ConversationState::AwaitingPickTarget));
    }

    #[test]
    fn test_states_are_tracked_per_user() {
        let tracker = ConversationTracker::new();

        tracker.set(1, ConversationState::AwaitingPickTarget);
        tracker.set(2, ConversationState::AwaitingButtonName);

        assert_eq!(tracker.get(1), Some(ConversationState::AwaitingPickTarget));
        assert_eq!(tracker.get(2), Some(ConversationState::AwaitingButtonName));
    }

    #[test]
    fn test_clear_resets_the_user_to_idle() {
        let tracker = ConversationTracker::new();

        tracker.set(1, ConversationState::AwaitingButtonName);
        tracker.clear(1);

        assert_eq!(tracker.get(1), None);
    }

    #[test]
    fn test_overwriting_moves_the_wizard_forward() {
        let tracker = ConversationTracker::new();

        tracker.set(1, ConversationState::AwaitingButtonName);
        tracker.set(
            1,
            ConversationState::AwaitingButtonUrl {
                name: "Join".to_string(),
            },
        );

        assert_eq!(
            tracker.get(1),
            Some(ConversationState::AwaitingButtonUrl {
                name: "Join".to_string()
            })
        );
    }

    #[test]
    fn test_expired_states_read_as_idle() {
        let tracker = ConversationTracker::with_ttl(Duration::from_millis(0));

        tracker.set(1, ConversationState::AwaitingPickTarget);
        thread::sleep(Duration::from_millis(5));

        assert_eq!(tracker.get(1), None);
        // The expired entry is dropped, not just hidden.
        assert_eq!(tracker.states.contains_key(&1), false);
    }
}
