use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^@[A-Za-z0-9_]{1,32}$").unwrap();
}

// A typed view over the colon-delimited callback-data protocol. Every
// button press arrives as one of these strings; anything else is rejected
// by the dispatcher with an "Unknown action." reply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallbackAction {
    // Entrant-facing actions
    Enter,
    Help,
    AdminPanel,
    // Giveaway lifecycle
    Start,
    End,
    ConfirmEnd,
    CancelEnd,
    // Winner selection
    PickRandom,
    PickSpecific,
    // Listings
    ShowEntries,
    ShowWinners,
    ClearWinners,
    // Announcement settings
    SetAnnounceInterval,
    ResetAnnounce,
    ConfirmResetAnnounce,
    CancelResetAnnounce,
    // Custom button management
    ManageButtons,
    AddButton,
    AddSideBySide,
    AddRegular,
    EditButton(usize),
    DeleteButton(usize),
    Noop,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        let action = match data {
            "noop" => CallbackAction::Noop,
            "user:enter" => CallbackAction::Enter,
            "user:help" => CallbackAction::Help,
            "user:admin" => CallbackAction::AdminPanel,
            "admin:start" => CallbackAction::Start,
            "admin:end" => CallbackAction::End,
            "admin:confirm_end" => CallbackAction::ConfirmEnd,
            "admin:cancel_end" => CallbackAction::CancelEnd,
            "admin:pick_random" => CallbackAction::PickRandom,
            "admin:pick_specific" => CallbackAction::PickSpecific,
            "admin:show_entries" => CallbackAction::ShowEntries,
            "admin:show_winners" => CallbackAction::ShowWinners,
            "admin:clear_winners" => CallbackAction::ClearWinners,
            "admin:set_announce_interval" => CallbackAction::SetAnnounceInterval,
            "admin:reset_announce" => CallbackAction::ResetAnnounce,
            "admin:confirm_reset_announce" => CallbackAction::ConfirmResetAnnounce,
            "admin:cancel_reset_announce" => CallbackAction::CancelResetAnnounce,
            "admin:manage_buttons" => CallbackAction::ManageButtons,
            "admin:add_button" => CallbackAction::AddButton,
            "admin:add_side_by_side" => CallbackAction::AddSideBySide,
            "admin:add_regular" => CallbackAction::AddRegular,
            other => {
                if let Some(raw) = other.strip_prefix("admin:edit_button:") {
                    return raw.parse().ok().map(CallbackAction::EditButton);
                }
                if let Some(raw) = other.strip_prefix("admin:delete_button:") {
                    return raw.parse().ok().map(CallbackAction::DeleteButton);
                }
                return None;
            }
        };

        Some(action)
    }
}

// Target of a specific pick, taken from the admin's next text message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickTarget {
    UserId(u64),
    Username(String),
}

impl fmt::Display for PickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickTarget::UserId(user_id) => write!(f, "{}", user_id),
            PickTarget::Username(name) => write!(f, "@{}", name),
        }
    }
}

pub fn parse_pick_target(text: &str) -> Option<PickTarget> {
    let text = text.trim();
    if let Ok(user_id) = text.parse::<u64>() {
        return Some(PickTarget::UserId(user_id));
    }

    match USERNAME_REGEX.is_match(text) {
        true => Some(PickTarget::Username(text.trim_start_matches('@').to_string())),
        false => None,
    }
}

// Accepts only absolute http(s) URLs for custom buttons; Telegram rejects
// anything else when the keyboard is sent.
pub fn parse_button_url(text: &str) -> Option<Url> {
    let url = Url::parse(text.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}
