use teloxide::prelude::*;
use teloxide::types::{ChatId, User};
use teloxide::utils::command::BotCommands;
use tracing::info;

use crate::auth::is_admin;
use crate::bot::BotContext;
use crate::commands::giveaway::directory::LinkOutcome;
use crate::commands::giveaway::formatters::{
    DefaultRosterFormatter, render_entries, render_winners,
};
use crate::commands::giveaway::keyboards;
use crate::commands::giveaway::models::Entrant;
use crate::commands::giveaway::parser::{parse_button_url, parse_pick_target};
use crate::commands::giveaway::strategies::TargetPick;
use crate::conversation::ConversationState;
use crate::error::{Error, Result};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Supported commands:")]
pub enum Command {
    #[command(description = "show the entrant menu.")]
    Start,
    #[command(description = "link this group, or open the admin panel in a DM.")]
    Admin,
    #[command(description = "post the giveaway entry point in a group.")]
    Giveaway,
    #[command(description = "alias of /giveaway.")]
    Gstart,
    #[command(description = "set the announcement interval in minutes.")]
    GsetAnnounceInterval(String),
    #[command(description = "set the announcement interval and message.")]
    GsetAnnounceSettings(String),
    #[command(description = "show the current announcement settings.")]
    GshowAnnounceSettings,
    #[command(description = "list the current entries.")]
    GshowEntries,
    #[command(description = "list the picked winners.")]
    GshowWinners,
}

pub async fn handle_command(
    bot: &Bot,
    msg: &Message,
    command: Command,
    context: &BotContext,
) -> Result<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };

    match command {
        Command::Start => {
            if msg.chat.is_private() {
                send_entrant_menu(bot, msg, user, context).await?;
            }
        }
        Command::Admin => handle_admin_command(bot, msg, user, context).await?,
        Command::Giveaway | Command::Gstart => {
            handle_group_entry_point(bot, msg, user, context).await?;
        }
        Command::GsetAnnounceInterval(args) => {
            handle_set_announce_interval(bot, msg, user, &args, context).await?;
        }
        Command::GsetAnnounceSettings(args) => {
            handle_set_announce_settings(bot, msg, user, &args, context).await?;
        }
        Command::GshowAnnounceSettings => {
            if !require_admin(bot, msg, user, context).await? {
                return Ok(());
            }
            let settings = context.announce.current();
            bot.send_message(
                msg.chat.id,
                format!(
                    "Current announcement interval: {} minutes\nCurrent message: {}",
                    settings.interval, settings.message
                ),
            )
            .await?;
        }
        Command::GshowEntries => {
            if !require_admin(bot, msg, user, context).await? {
                return Ok(());
            }
            let state = context.manager.snapshot();
            let listing = render_entries(&DefaultRosterFormatter::new(), &state.entries);
            bot.send_message(msg.chat.id, listing).await?;
        }
        Command::GshowWinners => {
            if !require_admin(bot, msg, user, context).await? {
                return Ok(());
            }
            let state = context.manager.snapshot();
            let listing = render_winners(&DefaultRosterFormatter::new(), &state.winners);
            bot.send_message(msg.chat.id, listing).await?;
        }
    }

    Ok(())
}

// Free text is only meaningful while the sender has a pending
// conversation step; everything else is ignored.
pub async fn handle_text(bot: &Bot, msg: &Message, context: &BotContext) -> Result<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(step) = context.conversations.get(user.id.0) else {
        return Ok(());
    };

    match step {
        ConversationState::AwaitingPickTarget => {
            handle_pick_target(bot, msg, user, text, context).await?;
        }
        ConversationState::AwaitingButtonName => {
            let name = text.trim();
            if name.is_empty() {
                bot.send_message(msg.chat.id, "The button name can't be empty. Send it again.")
                    .await?;
                return Ok(());
            }
            context.conversations.set(
                user.id.0,
                ConversationState::AwaitingButtonUrl {
                    name: name.to_string(),
                },
            );
            bot.send_message(msg.chat.id, "Now send the button URL (http or https).")
                .await?;
        }
        ConversationState::AwaitingButtonUrl { name } => match parse_button_url(text) {
            Some(url) => {
                context.conversations.set(
                    user.id.0,
                    ConversationState::AwaitingButtonPlacement {
                        name,
                        url: url.to_string(),
                    },
                );
                bot.send_message(msg.chat.id, "Should the button share a row with its neighbour?")
                    .reply_markup(keyboards::placement_keyboard())
                    .await?;
            }
            None => {
                bot.send_message(
                    msg.chat.id,
                    "That doesn't look like an http(s) URL. Send it again.",
                )
                .await?;
            }
        },
        ConversationState::AwaitingButtonPlacement { .. } => {
            bot.send_message(msg.chat.id, "Use the buttons above to choose the placement.")
                .await?;
        }
    }

    Ok(())
}

// Sends the group announcement for the admin's linked group, if any. Used
// after starting a giveaway and after picking a winner from a private chat.
pub async fn broadcast_to_linked_group(
    bot: &Bot,
    context: &BotContext,
    admin_id: u64,
    text: &str,
) -> Result<()> {
    let Some(group_id) = context.directory.group_for(admin_id) else {
        return Ok(());
    };

    bot.send_message(ChatId(group_id), text)
        .reply_markup(keyboards::dm_link_keyboard(&context.bot_username))
        .await?;

    Ok(())
}

async fn send_entrant_menu(
    bot: &Bot,
    msg: &Message,
    user: &User,
    context: &BotContext,
) -> Result<()> {
    let show_admin_panel = is_admin(bot, context, &msg.chat, user.id).await;
    let keyboard = keyboards::user_keyboard(show_admin_panel, &context.buttons.all());

    bot.send_message(msg.chat.id, "Welcome! Tap below to enter the current giveaway.")
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

async fn handle_admin_command(
    bot: &Bot,
    msg: &Message,
    user: &User,
    context: &BotContext,
) -> Result<()> {
    if !require_admin(bot, msg, user, context).await? {
        return Ok(());
    }

    if msg.chat.is_group() || msg.chat.is_supergroup() {
        let reply = match context.directory.link(user.id.0, msg.chat.id.0)? {
            LinkOutcome::Linked => {
                info!("Admin {} linked to group {}", user.id, msg.chat.id);
                "You've been added as a giveaway admin for this group!"
            }
            LinkOutcome::AlreadyLinked => "You're already a giveaway admin for this group!",
        };
        bot.send_message(msg.chat.id, reply).await?;
        return Ok(());
    }

    let state = context.manager.snapshot();
    bot.send_message(msg.chat.id, "Admin Panel")
        .reply_markup(keyboards::admin_keyboard(&state))
        .await?;

    Ok(())
}

async fn handle_group_entry_point(
    bot: &Bot,
    msg: &Message,
    user: &User,
    context: &BotContext,
) -> Result<()> {
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return send_entrant_menu(bot, msg, user, context).await;
    }

    // Group admins get linked on the way through, everyone else just
    // receives the entry point.
    if is_admin(bot, context, &msg.chat, user.id).await {
        context.directory.link(user.id.0, msg.chat.id.0)?;
    }

    bot.send_message(msg.chat.id, "To enter the giveaway, DM this bot and use /start.")
        .reply_markup(keyboards::dm_link_keyboard(&context.bot_username))
        .await?;

    Ok(())
}

async fn handle_set_announce_interval(
    bot: &Bot,
    msg: &Message,
    user: &User,
    args: &str,
    context: &BotContext,
) -> Result<()> {
    if !msg.chat.is_private() {
        bot.send_message(
            msg.chat.id,
            "Please use this command in a private chat with the bot.",
        )
        .await?;
        return Ok(());
    }
    if !require_admin(bot, msg, user, context).await? {
        return Ok(());
    }

    let Ok(minutes) = args.trim().parse::<u64>() else {
        bot.send_message(msg.chat.id, "Usage: /gset_announce_interval <minutes>")
            .await?;
        return Ok(());
    };

    match context.announce.set_interval(minutes) {
        Ok(settings) => {
            bot.send_message(
                msg.chat.id,
                format!("Announcement interval set to {} minutes.", settings.interval),
            )
            .await?;
        }
        Err(Error::Giveaway(reason)) => {
            bot.send_message(msg.chat.id, reason).await?;
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

async fn handle_set_announce_settings(
    bot: &Bot,
    msg: &Message,
    user: &User,
    args: &str,
    context: &BotContext,
) -> Result<()> {
    if !require_admin(bot, msg, user, context).await? {
        return Ok(());
    }

    let mut parts = args.split_whitespace();
    let minutes = parts.next().and_then(|chunk| chunk.parse::<u64>().ok());
    let message = parts.collect::<Vec<&str>>().join(" ");

    let Some(minutes) = minutes else {
        bot.send_message(
            msg.chat.id,
            "Usage: /gset_announce_settings <minutes> <message>",
        )
        .await?;
        return Ok(());
    };
    if message.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Usage: /gset_announce_settings <minutes> <message>",
        )
        .await?;
        return Ok(());
    }

    match context.announce.set(minutes, &message) {
        Ok(settings) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "Announcement interval set to {} minutes.\nMessage set to: {}",
                    settings.interval, settings.message
                ),
            )
            .await?;
        }
        Err(Error::Giveaway(reason)) => {
            bot.send_message(msg.chat.id, reason).await?;
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

async fn handle_pick_target(
    bot: &Bot,
    msg: &Message,
    user: &User,
    text: &str,
    context: &BotContext,
) -> Result<()> {
    if !is_admin(bot, context, &msg.chat, user.id).await {
        context.conversations.clear(user.id.0);
        bot.send_message(msg.chat.id, "Unauthorized.").await?;
        return Ok(());
    }

    let Some(target) = parse_pick_target(text) else {
        bot.send_message(msg.chat.id, "Send a numeric user ID or an @username.")
            .await?;
        return Ok(());
    };
    context.conversations.clear(user.id.0);

    match context.manager.pick(&TargetPick::new(target)) {
        Ok(winner) => {
            info!(
                "Specific winner picked: {} (id {})",
                winner.label(),
                winner.user_id
            );
            if msg.chat.is_private() {
                broadcast_to_linked_group(
                    bot,
                    context,
                    user.id.0,
                    &format!("🎉 Giveaway Winner: {} (id {})", winner.label(), winner.user_id),
                )
                .await?;
            }
            bot.send_message(
                msg.chat.id,
                format!(
                    "Winner: {} (id {}) 🏆\nRemoved from current pool.",
                    winner.label(),
                    winner.user_id
                ),
            )
            .await?;
        }
        Err(Error::Giveaway(reason)) => {
            bot.send_message(msg.chat.id, reason).await?;
        }
        Err(err) => return Err(err),
    }

    Ok(())
}

// Replies "Unauthorized." and returns false when the user fails the admin
// check for this chat.
async fn require_admin(
    bot: &Bot,
    msg: &Message,
    user: &User,
    context: &BotContext,
) -> Result<bool> {
    match is_admin(bot, context, &msg.chat, user.id).await {
        true => Ok(true),
        false => {
            bot.send_message(msg.chat.id, "Unauthorized.").await?;
            Ok(false)
        }
    }
}
