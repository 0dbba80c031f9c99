use serenity::all::{GuildId, Mentionable, UserId};

use crate::bot::gateway::DiscordGateway;
use crate::service::welcome::WelcomeSettingsService;

/// Builds the welcome message for a newly joined member.
pub fn welcome_message(user_id: UserId) -> String {
    format!(
        "Willkommen in **Ronin Realm | 浪人界**, {}! 🥷\n\nBitte lies die Regeln und stell dich kurz vor.",
        user_id.mention()
    )
}

/// Handles the guild_member_addition event when a member joins a guild
///
/// Posts the welcome message to the guild's configured welcome channel. Guilds without
/// a welcome channel, or whose channel has since been deleted, are skipped silently.
pub async fn handle_guild_member_addition(
    welcome: &WelcomeSettingsService,
    gateway: &dyn DiscordGateway,
    guild_id: GuildId,
    user_id: UserId,
) {
    let Some(channel_id) = welcome.get(guild_id).await else {
        return;
    };

    if !gateway.channel_exists(guild_id, channel_id) {
        tracing::debug!(
            "Welcome channel {} no longer exists in guild {}",
            channel_id,
            guild_id
        );
        return;
    }

    if let Err(e) = gateway
        .send_message(channel_id, welcome_message(user_id))
        .await
    {
        tracing::error!(
            "Failed to send welcome message to channel {}: {:?}",
            channel_id,
            e
        );
    } else {
        tracing::debug!("Welcomed user {} in guild {}", user_id, guild_id);
    }
}
