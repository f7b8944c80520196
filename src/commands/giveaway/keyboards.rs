// Inline keyboard layouts for the entrant menu, the admin panel and the
// confirmation sub-dialogs.
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;
use url::Url;

use crate::commands::giveaway::models::{CustomButton, GiveawayState};
use crate::commands::giveaway::parser::parse_button_url;

pub fn admin_keyboard(state: &GiveawayState) -> InlineKeyboardMarkup {
    let toggle = match state.active {
        true => InlineKeyboardButton::callback("End Giveaway ⛔", "admin:end"),
        false => InlineKeyboardButton::callback("Start Giveaway ✅", "admin:start"),
    };

    InlineKeyboardMarkup::new(vec![
        vec![
            toggle,
            InlineKeyboardButton::callback("Pick Random 🎲", "admin:pick_random"),
        ],
        vec![
            InlineKeyboardButton::callback("Pick Specific 🎯", "admin:pick_specific"),
            InlineKeyboardButton::callback("Clear Winners 🧹", "admin:clear_winners"),
        ],
        vec![
            InlineKeyboardButton::callback("Show Entries 📋", "admin:show_entries"),
            InlineKeyboardButton::callback("Show Winners 🏆", "admin:show_winners"),
        ],
        vec![
            InlineKeyboardButton::callback("Set Announcement 📡", "admin:set_announce_interval"),
            InlineKeyboardButton::callback("Reset Announcements 🔁", "admin:reset_announce"),
        ],
        vec![InlineKeyboardButton::callback(
            "Manage Buttons 🔘",
            "admin:manage_buttons",
        )],
    ])
}

pub fn user_keyboard(show_admin_panel: bool, buttons: &[CustomButton]) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::callback(
        "🎁 Click to Enter Giveaway",
        "user:enter",
    )]];
    rows.extend(custom_button_rows(buttons));
    rows.push(vec![InlineKeyboardButton::callback("❓ Help", "user:help")]);
    if show_admin_panel {
        rows.push(vec![InlineKeyboardButton::callback(
            "🛠 Admin Panel",
            "user:admin",
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}

// Renders the admin-defined buttons; two adjacent side-by-side buttons
// share one row, everything else gets a row of its own.
pub fn custom_button_rows(buttons: &[CustomButton]) -> Vec<Vec<InlineKeyboardButton>> {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut half_open = false;

    for button in buttons {
        let url = match parse_button_url(&button.url) {
            Some(url) => url,
            None => {
                warn!("Skipping the custom button '{}': malformed URL", button.name);
                continue;
            }
        };
        let rendered = InlineKeyboardButton::url(button.name.clone(), url);

        match (button.side_by_side && half_open, rows.last_mut()) {
            (true, Some(row)) => {
                row.push(rendered);
                half_open = false;
            }
            _ => {
                half_open = button.side_by_side;
                rows.push(vec![rendered]);
            }
        }
    }

    rows
}

pub fn manage_buttons_keyboard(buttons: &[CustomButton]) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();
    for (index, button) in buttons.iter().enumerate() {
        rows.push(vec![
            InlineKeyboardButton::callback(
                format!("✏️ {}", button.name),
                format!("admin:edit_button:{}", index),
            ),
            InlineKeyboardButton::callback(
                format!("🗑 {}", button.name),
                format!("admin:delete_button:{}", index),
            ),
        ]);
    }
    rows.push(vec![InlineKeyboardButton::callback(
        "➕ Add Button",
        "admin:add_button",
    )]);
    rows.push(vec![InlineKeyboardButton::callback(
        "⬅️ Back",
        "user:admin",
    )]);

    InlineKeyboardMarkup::new(rows)
}

pub fn placement_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Side by side", "admin:add_side_by_side"),
        InlineKeyboardButton::callback("Own row", "admin:add_regular"),
    ]])
}

pub fn confirm_end_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Yes", "admin:confirm_end"),
        InlineKeyboardButton::callback("No", "admin:cancel_end"),
    ]])
}

pub fn confirm_reset_announce_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Yes", "admin:confirm_reset_announce"),
        InlineKeyboardButton::callback("No", "admin:cancel_reset_announce"),
    ]])
}

// A single "DM the Bot" deep link, attached to everything the bot posts
// into group chats.
pub fn dm_link_keyboard(bot_username: &str) -> InlineKeyboardMarkup {
    let rows = match Url::parse(&format!("https://t.me/{}", bot_username)) {
        Ok(link) => vec![vec![InlineKeyboardButton::url("DM the Bot", link)]],
        Err(_) => Vec::new(),
    };

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use crate::commands::giveaway::keyboards::{
        admin_keyboard, custom_button_rows, dm_link_keyboard, manage_buttons_keyboard,
        user_keyboard,
    };
    use crate::commands::giveaway::models::{CustomButton, GiveawayState};

    fn get_button(name: &str, side_by_side: bool) -> CustomButton {
        CustomButton {
            name: name.to_string(),
            url: "https://example.com".to_string(),
            side_by_side,
        }
    }

    fn callback_data(button: &teloxide::types::InlineKeyboardButton) -> String {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
            other => panic!("expected callback data, got {:?}", other),
        }
    }

    #[test]
    fn test_admin_keyboard_offers_start_when_inactive() {
        let state = GiveawayState::default();

        let markup = admin_keyboard(&state);
        assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "admin:start");
    }

    #[test]
    fn test_admin_keyboard_offers_end_when_active() {
        let state = GiveawayState {
            active: true,
            ..GiveawayState::default()
        };

        let markup = admin_keyboard(&state);
        assert_eq!(callback_data(&markup.inline_keyboard[0][0]), "admin:end");
    }

    #[test]
    fn test_adjacent_side_by_side_buttons_share_a_row() {
        let buttons = vec![
            get_button("a", true),
            get_button("b", true),
            get_button("c", true),
        ];

        let rows = custom_button_rows(&buttons);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_regular_buttons_break_the_pairing() {
        let buttons = vec![
            get_button("a", true),
            get_button("b", false),
            get_button("c", true),
        ];

        let rows = custom_button_rows(&buttons);
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert_eq!(row.len(), 1);
        }
    }

    #[test]
    fn test_buttons_with_malformed_urls_are_skipped() {
        let buttons = vec![
            CustomButton {
                name: "broken".to_string(),
                url: "not a url".to_string(),
                side_by_side: false,
            },
            get_button("fine", false),
        ];

        let rows = custom_button_rows(&buttons);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].text, "fine");
    }

    #[test]
    fn test_user_keyboard_hides_the_admin_panel_for_entrants() {
        let markup = user_keyboard(false, &[]);

        let all_data = markup
            .inline_keyboard
            .iter()
            .flatten()
            .map(callback_data)
            .collect::<Vec<String>>();
        assert_eq!(all_data.contains(&"user:admin".to_string()), false);
        assert_eq!(all_data.contains(&"user:enter".to_string()), true);
    }

    #[test]
    fn test_user_keyboard_shows_the_admin_panel_for_admins() {
        let markup = user_keyboard(true, &[]);

        let last_row = markup.inline_keyboard.last().unwrap();
        assert_eq!(callback_data(&last_row[0]), "user:admin");
    }

    #[test]
    fn test_manage_buttons_keyboard_pairs_edit_and_delete() {
        let buttons = vec![get_button("first", false), get_button("second", false)];

        let markup = manage_buttons_keyboard(&buttons);
        assert_eq!(markup.inline_keyboard.len(), 4);
        assert_eq!(
            callback_data(&markup.inline_keyboard[0][0]),
            "admin:edit_button:0"
        );
        assert_eq!(
            callback_data(&markup.inline_keyboard[1][1]),
            "admin:delete_button:1"
        );
        assert_eq!(
            callback_data(&markup.inline_keyboard[2][0]),
            "admin:add_button"
        );
    }

    #[test]
    fn test_dm_link_keyboard_points_at_the_bot() {
        let markup = dm_link_keyboard("giveaway_bot");

        assert_eq!(markup.inline_keyboard.len(), 1);
        match &markup.inline_keyboard[0][0].kind {
            InlineKeyboardButtonKind::Url(url) => {
                assert_eq!(url.as_str(), "https://t.me/giveaway_bot");
            }
            other => panic!("expected a url button, got {:?}", other),
        }
    }
}
