use std::sync::Arc;

use teloxide::prelude::*;
use tracing::error;

use crate::commands::giveaway::announce::AnnounceStore;
use crate::commands::giveaway::buttons::ButtonStore;
use crate::commands::giveaway::directory::AdminDirectory;
use crate::commands::giveaway::handlers::{self, Command};
use crate::commands::giveaway::{callbacks, manager::GiveawayManager};
use crate::config::Config;
use crate::conversation::ConversationTracker;

// Everything the handlers need, passed through the dispatcher instead of
// living in process-wide globals.
pub struct BotContext {
    pub config: Config,
    pub manager: GiveawayManager,
    pub directory: AdminDirectory,
    pub announce: AnnounceStore,
    pub buttons: ButtonStore,
    pub conversations: ConversationTracker,
    pub bot_username: String,
}

impl BotContext {
    pub fn new(config: Config, bot_username: String) -> Self {
        BotContext {
            manager: GiveawayManager::new(config.giveaway_path()),
            directory: AdminDirectory::new(config.admin_groups_path()),
            announce: AnnounceStore::new(config.announce_settings_path()),
            buttons: ButtonStore::new(config.custom_buttons_path()),
            conversations: ConversationTracker::new(),
            bot_username,
            config,
        }
    }
}

pub async fn run(bot: Bot, context: Arc<BotContext>) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_message().endpoint(on_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![context])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_command(
    bot: Bot,
    msg: Message,
    command: Command,
    context: Arc<BotContext>,
) -> ResponseResult<()> {
    if let Err(err) = handlers::handle_command(&bot, &msg, command, &context).await {
        error!("Command handler failed: {}", err);
    }
    respond(())
}

async fn on_callback(
    bot: Bot,
    query: CallbackQuery,
    context: Arc<BotContext>,
) -> ResponseResult<()> {
    if let Err(err) = callbacks::handle_callback(&bot, &query, &context).await {
        error!("Callback handler failed: {}", err);
    }
    respond(())
}

async fn on_text(bot: Bot, msg: Message, context: Arc<BotContext>) -> ResponseResult<()> {
    if let Err(err) = handlers::handle_text(&bot, &msg, &context).await {
        error!("Message handler failed: {}", err);
    }
    respond(())
}
