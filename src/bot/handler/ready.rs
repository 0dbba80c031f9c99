//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake. It logs the
//! bot's identity and registers the slash commands for the configured guild.

use serenity::all::{GuildId, Ready};

use crate::bot::command::{register_commands, CommandRegistry};
use crate::bot::gateway::DiscordGateway;

/// Handles the ready event when the bot connects to Discord.
///
/// Registration failures are logged and otherwise ignored; the bot keeps running with
/// whatever commands Discord already had for the guild.
///
/// # Arguments
/// - `gateway` - Discord API access for command registration
/// - `ready` - Ready event data containing bot user information
/// - `registry` - Commands to register
/// - `guild_id` - Guild the commands are scoped to
pub async fn handle_ready(
    gateway: &dyn DiscordGateway,
    ready: Ready,
    registry: &CommandRegistry,
    guild_id: GuildId,
) {
    tracing::info!("Logged in as {}", ready.user.tag());

    if let Err(e) = register_commands(gateway, guild_id, registry).await {
        tracing::error!("Failed to register slash commands: {:?}", e);
    }
}
