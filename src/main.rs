pub mod announcer;
pub mod auth;
pub mod bot;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod storage;

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use crate::announcer::Announcer;
use crate::bot::BotContext;
use crate::config::Config;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let bot = Bot::from_env();
    let me = bot
        .get_me()
        .await
        .expect("Cannot fetch the bot identity from Telegram");

    let context = Arc::new(BotContext::new(config, me.username().to_string()));
    info!("@{} is connected!", context.bot_username);

    tokio::spawn(Announcer::new(bot.clone(), context.clone()).run());
    bot::run(bot, context).await;
}
