use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::time;
use tracing::{info, warn};

use crate::bot::BotContext;
use crate::commands::giveaway::keyboards;

// Periodically re-posts the announcement to every linked group while a
// giveaway is active. Settings are re-read after each sleep, so a changed
// interval takes effect once the current one elapses. State is read
// without the giveaway lock; a value about to change is good enough here.
pub struct Announcer {
    bot: Bot,
    context: Arc<BotContext>,
}

impl Announcer {
    pub fn new(bot: Bot, context: Arc<BotContext>) -> Self {
        Announcer { bot, context }
    }

    pub async fn run(self) {
        info!("Announcer started");
        let mut interval = self.context.announce.current().interval;

        loop {
            time::sleep(Duration::from_secs(interval.saturating_mul(60))).await;

            let settings = self.context.announce.current();
            interval = settings.interval;

            let state = self.context.manager.peek();
            if !state.active {
                continue;
            }

            for group_id in self.context.directory.group_ids() {
                let request = self
                    .bot
                    .send_message(ChatId(group_id), &settings.message)
                    .reply_markup(keyboards::dm_link_keyboard(&self.context.bot_username));

                if let Err(err) = request.await {
                    warn!("Can't deliver the announcement to group {}: {}", group_id, err);
                }
            }
        }
    }
}
