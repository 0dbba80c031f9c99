//! Welcome channel settings held in memory for the lifetime of the process.
//!
//! This module provides the `WelcomeSettingsService`, which maps each guild to the
//! channel that receives welcome messages for newly joined members. Entries are created
//! by the `begruessung` command, overwritten on reconfiguration and never removed.
//! Nothing is persisted; a restart starts from an empty map.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{ChannelId, GuildId};
use tokio::sync::RwLock;

/// Service for storing the welcome channel of each guild.
///
/// Constructed once at startup and handed to the event handler. Clones share the same
/// underlying map, so the command handler that writes a setting and the member join
/// handler that reads it always observe the same state. Every operation takes the lock
/// for a single map access and never holds it across another await point.
#[derive(Clone, Default)]
pub struct WelcomeSettingsService {
    channels: Arc<RwLock<HashMap<GuildId, ChannelId>>>,
}

impl WelcomeSettingsService {
    /// Creates an empty settings store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the welcome channel for a guild, replacing any previous setting.
    ///
    /// # Arguments
    /// - `guild_id` - Guild being configured
    /// - `channel_id` - Channel that should receive welcome messages
    ///
    /// # Returns
    /// - `Some(ChannelId)` - The channel that was configured before this call
    /// - `None` - The guild had no welcome channel yet
    pub async fn set(&self, guild_id: GuildId, channel_id: ChannelId) -> Option<ChannelId> {
        self.channels.write().await.insert(guild_id, channel_id)
    }

    /// Gets the welcome channel configured for a guild.
    ///
    /// # Returns
    /// - `Some(ChannelId)` - The configured channel
    /// - `None` - No welcome channel has been configured for this guild
    pub async fn get(&self, guild_id: GuildId) -> Option<ChannelId> {
        self.channels.read().await.get(&guild_id).copied()
    }
}
