//! Boundary between the bot's logic and the Discord API.
//!
//! Command and event handlers never call Serenity directly; they go through the
//! `DiscordGateway` trait so they can be exercised without a live connection. The
//! production implementation, `SerenityGateway`, wraps the Serenity `Context` handed to
//! each event.

use serenity::all::{
    ChannelId, Context, CreateCommand, GetMessages, GuildId, MessageId, Timestamp, UserId,
};
use serenity::async_trait;
use serenity::http::HttpError;

use crate::error::AppError;

/// Discord refuses to bulk delete messages older than two weeks.
pub const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Discord operations the bot performs.
#[async_trait]
pub trait DiscordGateway: Send + Sync {
    /// Replaces every slash command registered for the guild with `commands`.
    async fn set_guild_commands(
        &self,
        guild_id: GuildId,
        commands: Vec<CreateCommand>,
    ) -> Result<(), AppError>;

    /// Whether the channel is still one of the guild's channels.
    fn channel_exists(&self, guild_id: GuildId, channel_id: ChannelId) -> bool;

    async fn send_message(&self, channel_id: ChannelId, content: String) -> Result<(), AppError>;

    /// Whether the user is currently a member of the guild.
    async fn is_member(&self, guild_id: GuildId, user_id: UserId) -> Result<bool, AppError>;

    async fn kick(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<(), AppError>;

    async fn ban(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<(), AppError>;

    /// Deletes up to `limit` of the newest messages in the channel, skipping those past
    /// the bulk delete age cutoff.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of messages actually deleted
    async fn delete_recent_messages(&self, channel_id: ChannelId, limit: u8)
        -> Result<usize, AppError>;
}

/// Selects the messages Discord will accept in a bulk delete.
///
/// A message's age is read from its snowflake id, so no message payload is needed.
/// The comparison is done in whole seconds: creation times are truncated to the second,
/// so messages at the cutoff second, including those a fraction of a second younger
/// than 14 days, are excluded.
///
/// # Arguments
/// - `message_ids` - Candidate messages, in any order
/// - `now` - Reference time for the age cutoff
pub fn bulk_deletable(
    message_ids: impl IntoIterator<Item = MessageId>,
    now: Timestamp,
) -> Vec<MessageId> {
    let cutoff = now.unix_timestamp() - BULK_DELETE_MAX_AGE_SECS;

    message_ids
        .into_iter()
        .filter(|id| id.created_at().unix_timestamp() > cutoff)
        .collect()
}

/// `DiscordGateway` backed by the live Serenity client.
pub struct SerenityGateway {
    ctx: Context,
}

impl SerenityGateway {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl DiscordGateway for SerenityGateway {
    async fn set_guild_commands(
        &self,
        guild_id: GuildId,
        commands: Vec<CreateCommand>,
    ) -> Result<(), AppError> {
        guild_id.set_commands(&self.ctx.http, commands).await?;

        Ok(())
    }

    fn channel_exists(&self, guild_id: GuildId, channel_id: ChannelId) -> bool {
        self.ctx
            .cache
            .guild(guild_id)
            .is_some_and(|guild| guild.channels.contains_key(&channel_id))
    }

    async fn send_message(&self, channel_id: ChannelId, content: String) -> Result<(), AppError> {
        channel_id.say(&self.ctx.http, content).await?;

        Ok(())
    }

    async fn is_member(&self, guild_id: GuildId, user_id: UserId) -> Result<bool, AppError> {
        if self.ctx.cache.member(guild_id, user_id).is_some() {
            return Ok(true);
        }

        // The member cache may be incomplete, so fall back to the API before giving up
        match self.ctx.http.get_member(guild_id, user_id).await {
            Ok(_) => Ok(true),
            Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(response)))
                if response.status_code.as_u16() == 404 =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn kick(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<(), AppError> {
        guild_id
            .kick_with_reason(&self.ctx.http, user_id, reason)
            .await?;

        Ok(())
    }

    async fn ban(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<(), AppError> {
        guild_id
            .ban_with_reason(&self.ctx.http, user_id, 0, reason)
            .await?;

        Ok(())
    }

    async fn delete_recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> Result<usize, AppError> {
        let messages = channel_id
            .messages(&self.ctx, GetMessages::new().limit(limit))
            .await?;

        let message_ids = bulk_deletable(messages.iter().map(|message| message.id), Timestamp::now());

        match message_ids.as_slice() {
            [] => {}
            // The bulk endpoint requires at least two messages
            [single] => channel_id.delete_message(&self.ctx.http, *single).await?,
            ids => channel_id.delete_messages(&self.ctx.http, ids).await?,
        }

        Ok(message_ids.len())
    }
}
