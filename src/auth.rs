use teloxide::prelude::*;
use teloxide::types::{Chat, UserId};
use tracing::warn;

use crate::bot::BotContext;

// Checks whether the user may run admin actions in the given chat.
//
// In group chats the administrator list is queried live; when the lookup
// fails the static allowlist is the fallback. In private chats the user
// must be present in the admin directory or in the allowlist.
pub async fn is_admin(bot: &Bot, context: &BotContext, chat: &Chat, user_id: UserId) -> bool {
    if chat.is_group() || chat.is_supergroup() {
        return match bot.get_chat_administrators(chat.id).await {
            Ok(members) => members
                .iter()
                .any(|member| member.user.id == user_id && member.is_privileged()),
            Err(err) => {
                warn!("Could not fetch chat admins: {}", err);
                context.config.admin_ids.contains(&user_id.0)
            }
        };
    }

    context.directory.contains(user_id.0) || context.config.admin_ids.contains(&user_id.0)
}
