use serde::{Deserialize, Serialize};
use teloxide::types::User as TelegramUser;

pub const DEFAULT_ANNOUNCE_INTERVAL: u64 = 15;
pub const DEFAULT_ANNOUNCE_MESSAGE: &str =
    "A giveaway is active! DM this bot and use /start to enter.";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub user_id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Entrant {
    // Label used in listings and winner announcements: the @username when
    // present, the full name otherwise.
    pub fn label(&self) -> String {
        match self.username.is_empty() {
            true => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
            false => format!("@{}", self.username),
        }
    }
}

impl From<&TelegramUser> for Entrant {
    fn from(user: &TelegramUser) -> Self {
        Entrant {
            user_id: user.id.0,
            username: user.username.clone().unwrap_or_default(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone().unwrap_or_default(),
        }
    }
}

// The single persisted giveaway document. The position inside `entries`
// defines the 1-based entry number; the position inside `winners` defines
// the pick order. Missing keys in an older file deserialize to defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GiveawayState {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub entries: Vec<Entrant>,
    #[serde(default)]
    pub winners: Vec<Entrant>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnnounceSettings {
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for AnnounceSettings {
    fn default() -> Self {
        AnnounceSettings {
            interval: DEFAULT_ANNOUNCE_INTERVAL,
            message: DEFAULT_ANNOUNCE_MESSAGE.to_string(),
        }
    }
}

fn default_interval() -> u64 {
    DEFAULT_ANNOUNCE_INTERVAL
}

fn default_message() -> String {
    DEFAULT_ANNOUNCE_MESSAGE.to_string()
}

// A call-to-action button configured by an admin and rendered on the
// entrant keyboard. Adjacent `side_by_side` buttons share one row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CustomButton {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub side_by_side: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryOutcome {
    // The user was appended to the pool under the given entry number.
    Entered(usize),
    // The user is already in the pool; carries the original entry number.
    AlreadyEntered(usize),
    // No giveaway is running.
    Inactive,
}
