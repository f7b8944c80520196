use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, Message};
use tracing::info;

use crate::auth::is_admin;
use crate::bot::BotContext;
use crate::commands::giveaway::formatters::{
    DefaultRosterFormatter, render_entries, render_winners,
};
use crate::commands::giveaway::handlers::broadcast_to_linked_group;
use crate::commands::giveaway::keyboards;
use crate::commands::giveaway::models::{CustomButton, Entrant, EntryOutcome};
use crate::commands::giveaway::parser::CallbackAction;
use crate::commands::giveaway::strategies::RandomPick;
use crate::conversation::ConversationState;
use crate::error::{Error, Result};

const HELP_TEXT: &str = "Help: To become an admin, use /giveaway or /gstart in your group chat \
                         as a group admin. Then DM this bot to access admin features.";

pub async fn handle_callback(bot: &Bot, query: &CallbackQuery, context: &BotContext) -> Result<()> {
    bot.answer_callback_query(query.id.clone()).await?;

    let Some(message) = query.message.as_ref() else {
        return Ok(());
    };

    let data = query.data.as_deref().unwrap_or("");
    let Some(action) = CallbackAction::parse(data) else {
        edit(bot, message, "Unknown action.", None).await?;
        return Ok(());
    };

    match action {
        CallbackAction::Noop => Ok(()),
        CallbackAction::Help => edit(bot, message, HELP_TEXT, None).await,
        CallbackAction::Enter => handle_enter(bot, query, message, context).await,
        admin_action => {
            if !is_admin(bot, context, &message.chat, query.from.id).await {
                return edit(bot, message, "Unauthorized.", None).await;
            }
            handle_admin_action(bot, query, message, admin_action, context).await
        }
    }
}

async fn handle_enter(
    bot: &Bot,
    query: &CallbackQuery,
    message: &Message,
    context: &BotContext,
) -> Result<()> {
    let entrant = Entrant::from(&query.from);
    let reply = match context.manager.enter(entrant)? {
        EntryOutcome::Inactive => "No active giveaway right now.".to_string(),
        EntryOutcome::AlreadyEntered(number) => {
            format!("You're already entered. Your number is #{}.", number)
        }
        EntryOutcome::Entered(number) => {
            info!(
                "User entered giveaway: id={}, username={}, entry number={}",
                query.from.id,
                query.from.username.as_deref().unwrap_or(""),
                number
            );
            format!("You're in! Your entry number is #{}. Good luck! 🎉", number)
        }
    };

    edit(bot, message, &reply, None).await
}

async fn handle_admin_action(
    bot: &Bot,
    query: &CallbackQuery,
    message: &Message,
    action: CallbackAction,
    context: &BotContext,
) -> Result<()> {
    let admin_id = query.from.id.0;

    match action {
        CallbackAction::AdminPanel => {
            let state = context.manager.snapshot();
            edit(
                bot,
                message,
                "Admin Panel",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::Start => {
            let state = context.manager.start()?;
            if message.chat.is_private() {
                broadcast_to_linked_group(
                    bot,
                    context,
                    admin_id,
                    "A giveaway has started! Use /start in private chat with the bot to enter.",
                )
                .await?;
            }
            edit(
                bot,
                message,
                "Giveaway started. Entries cleared.",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::End => {
            edit(
                bot,
                message,
                "Are you sure you want to end the giveaway?",
                Some(keyboards::confirm_end_keyboard()),
            )
            .await
        }
        CallbackAction::ConfirmEnd => {
            let state = context.manager.end()?;
            edit(
                bot,
                message,
                "Giveaway ended.",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::CancelEnd => {
            let state = context.manager.snapshot();
            edit(
                bot,
                message,
                "End giveaway cancelled.",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::PickRandom => match context.manager.pick(&RandomPick::new()) {
            Ok(winner) => {
                info!(
                    "Random winner picked: {} (id {})",
                    winner.label(),
                    winner.user_id
                );
                if message.chat.is_private() {
                    broadcast_to_linked_group(
                        bot,
                        context,
                        admin_id,
                        &format!("🎉 Giveaway Winner: {} (id {})", winner.label(), winner.user_id),
                    )
                    .await?;
                }
                let state = context.manager.snapshot();
                edit(
                    bot,
                    message,
                    &format!(
                        "Winner: {} (id {}) 🏆\nRemoved from current pool.",
                        winner.label(),
                        winner.user_id
                    ),
                    Some(keyboards::admin_keyboard(&state)),
                )
                .await
            }
            Err(Error::Giveaway(reason)) => {
                let state = context.manager.snapshot();
                edit(
                    bot,
                    message,
                    &reason,
                    Some(keyboards::admin_keyboard(&state)),
                )
                .await
            }
            Err(err) => Err(err),
        },
        CallbackAction::PickSpecific => {
            context
                .conversations
                .set(admin_id, ConversationState::AwaitingPickTarget);
            edit(
                bot,
                message,
                "Send a numeric user ID or an @username to pick.",
                None,
            )
            .await
        }
        CallbackAction::ShowEntries => {
            let state = context.manager.snapshot();
            let listing = render_entries(&DefaultRosterFormatter::new(), &state.entries);
            edit(bot, message, &listing, None).await
        }
        CallbackAction::ShowWinners => {
            let state = context.manager.snapshot();
            let listing = render_winners(&DefaultRosterFormatter::new(), &state.winners);
            edit(bot, message, &listing, None).await
        }
        CallbackAction::ClearWinners => {
            let state = context.manager.clear_winners()?;
            edit(
                bot,
                message,
                "Winners list cleared.",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::SetAnnounceInterval => {
            let state = context.manager.snapshot();
            let reply = match message.chat.is_private() {
                true => {
                    "To set the announcement interval, use:\n\
                     /gset_announce_settings <minutes> <message>\n\
                     Example: /gset_announce_settings 15 Giveaway is live! DM the bot to enter."
                }
                false => "Please DM the bot to set the announcement interval.",
            };
            edit(
                bot,
                message,
                reply,
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::ResetAnnounce => {
            edit(
                bot,
                message,
                "Are you sure you want to reset announcement settings?",
                Some(keyboards::confirm_reset_announce_keyboard()),
            )
            .await
        }
        CallbackAction::ConfirmResetAnnounce => {
            context.announce.reset()?;
            info!("Announcement settings reset to default.");
            let state = context.manager.snapshot();
            edit(
                bot,
                message,
                "Announcement settings reset to default.",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::CancelResetAnnounce => {
            let state = context.manager.snapshot();
            edit(
                bot,
                message,
                "Reset announcement cancelled.",
                Some(keyboards::admin_keyboard(&state)),
            )
            .await
        }
        CallbackAction::ManageButtons => show_button_list(bot, message, context).await,
        CallbackAction::AddButton => {
            context
                .conversations
                .set(admin_id, ConversationState::AwaitingButtonName);
            edit(bot, message, "Send the button name.", None).await
        }
        CallbackAction::AddSideBySide => {
            finish_button_wizard(bot, message, admin_id, true, context).await
        }
        CallbackAction::AddRegular => {
            finish_button_wizard(bot, message, admin_id, false, context).await
        }
        CallbackAction::EditButton(index) => match context.buttons.remove(index) {
            Ok(removed) => {
                context
                    .conversations
                    .set(admin_id, ConversationState::AwaitingButtonName);
                edit(
                    bot,
                    message,
                    &format!("Editing '{}'. Send the new button name.", removed.name),
                    None,
                )
                .await
            }
            Err(Error::Giveaway(reason)) => edit(bot, message, &reason, None).await,
            Err(err) => Err(err),
        },
        CallbackAction::DeleteButton(index) => match context.buttons.remove(index) {
            Ok(removed) => {
                info!("Custom button removed: {}", removed.name);
                show_button_list(bot, message, context).await
            }
            Err(Error::Giveaway(reason)) => edit(bot, message, &reason, None).await,
            Err(err) => Err(err),
        },
        // Enter, Help and Noop never reach this point.
        _ => Ok(()),
    }
}

async fn finish_button_wizard(
    bot: &Bot,
    message: &Message,
    admin_id: u64,
    side_by_side: bool,
    context: &BotContext,
) -> Result<()> {
    let Some(ConversationState::AwaitingButtonPlacement { name, url }) =
        context.conversations.get(admin_id)
    else {
        return edit(bot, message, "This action has expired.", None).await;
    };

    context.conversations.clear(admin_id);
    context.buttons.add(CustomButton {
        name: name.clone(),
        url,
        side_by_side,
    })?;
    info!("Custom button added: {}", name);

    show_button_list(bot, message, context).await
}

async fn show_button_list(bot: &Bot, message: &Message, context: &BotContext) -> Result<()> {
    let buttons = context.buttons.all();
    let text = match buttons.is_empty() {
        true => "No custom buttons yet.",
        false => "Custom buttons:",
    };

    edit(
        bot,
        message,
        text,
        Some(keyboards::manage_buttons_keyboard(&buttons)),
    )
    .await
}

// Replaces the text (and keyboard) of the message the pressed button is
// attached to, mirroring how the panel is navigated in place.
async fn edit(
    bot: &Bot,
    message: &Message,
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Result<()> {
    let request = bot.edit_message_text(message.chat.id, message.id, text);
    match keyboard {
        Some(markup) => {
            request.reply_markup(markup).await?;
        }
        None => {
            request.await?;
        }
    }

    Ok(())
}
