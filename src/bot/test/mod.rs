use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

use serenity::all::{
    ChannelId, CreateCommand, GuildId, MessageId, Permissions, Timestamp, UserId,
};
use serenity::async_trait;

use crate::bot::command::{CommandInvocation, CommandRegistry, OptionValue, Reply, TargetUser};
use crate::bot::gateway::{bulk_deletable, DiscordGateway};
use crate::bot::handler::interaction::dispatch;
use crate::error::AppError;
use crate::service::welcome::WelcomeSettingsService;

mod member_join;

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

fn guild() -> GuildId {
    GuildId::new(100_000_000_000_000_001)
}

fn channel() -> ChannelId {
    ChannelId::new(200_000_000_000_000_002)
}

fn general() -> ChannelId {
    ChannelId::new(300_000_000_000_000_003)
}

fn target() -> TargetUser {
    TargetUser {
        id: UserId::new(400_000_000_000_000_004),
        tag: "shinobi".to_string(),
    }
}

/// Builds a message id whose snowflake timestamp lies `secs_ago` seconds in the past.
///
/// `seq` fills the low bits so ids created for the same second stay distinct.
fn message_id_at(now: Timestamp, secs_ago: i64, seq: u64) -> MessageId {
    let created_ms = ((now.unix_timestamp() - secs_ago) * 1000) as u64;
    MessageId::new(((created_ms - DISCORD_EPOCH_MS) << 22) | (seq & 0x3F_FFFF))
}

/// Builds an in-guild invocation issued from `channel()`.
fn invocation(
    name: &str,
    permissions: Permissions,
    options: Vec<(&str, OptionValue)>,
) -> CommandInvocation {
    CommandInvocation {
        name: name.to_string(),
        guild_id: Some(guild()),
        channel_id: channel(),
        permissions,
        options: options
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

/// Dispatches through a registry with the bot's full command set.
async fn run(
    welcome: &WelcomeSettingsService,
    invocation: &CommandInvocation,
    gateway: &MockGateway,
) -> Option<Reply> {
    let registry = CommandRegistry::new(welcome.clone());
    dispatch(&registry, invocation, gateway).await
}

/// A Discord API call observed by `MockGateway`.
#[derive(Clone, Debug, PartialEq)]
enum GatewayCall {
    SetGuildCommands {
        guild_id: GuildId,
        commands: Vec<serde_json::Value>,
    },
    SendMessage {
        channel_id: ChannelId,
        content: String,
    },
    Kick {
        guild_id: GuildId,
        user_id: UserId,
        reason: String,
    },
    Ban {
        guild_id: GuildId,
        user_id: UserId,
        reason: String,
    },
    DeleteMessages {
        channel_id: ChannelId,
        message_ids: Vec<MessageId>,
    },
}

/// In-memory `DiscordGateway` that records every call.
///
/// Guild state (channels, members, channel history) is seeded through the builder
/// methods. With `failing()` every Discord write is rejected, imitating a bot that
/// lacks permissions or sits below its target in the role hierarchy. With
/// `failing_lookups()` member lookups error instead of answering.
#[derive(Default)]
struct MockGateway {
    channels: HashSet<(GuildId, ChannelId)>,
    members: HashSet<(GuildId, UserId)>,
    /// Channel history, oldest message first.
    history: HashMap<ChannelId, Vec<MessageId>>,
    fail_actions: bool,
    fail_lookups: bool,
    calls: Mutex<Vec<GatewayCall>>,
}

impl MockGateway {
    fn new() -> Self {
        Self::default()
    }

    fn with_channel(mut self, guild_id: GuildId, channel_id: ChannelId) -> Self {
        self.channels.insert((guild_id, channel_id));
        self
    }

    fn with_member(mut self, guild_id: GuildId, user_id: UserId) -> Self {
        self.members.insert((guild_id, user_id));
        self
    }

    fn with_history(mut self, channel_id: ChannelId, message_ids: Vec<MessageId>) -> Self {
        self.history.insert(channel_id, message_ids);
        self
    }

    fn failing(mut self) -> Self {
        self.fail_actions = true;
        self
    }

    fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) -> Result<(), AppError> {
        if self.fail_actions {
            return Err(AppError::IoErr(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Missing Permissions",
            )));
        }

        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl DiscordGateway for MockGateway {
    async fn set_guild_commands(
        &self,
        guild_id: GuildId,
        commands: Vec<CreateCommand>,
    ) -> Result<(), AppError> {
        let commands = commands
            .iter()
            .map(|command| serde_json::to_value(command).unwrap())
            .collect();

        self.record(GatewayCall::SetGuildCommands { guild_id, commands })
    }

    fn channel_exists(&self, guild_id: GuildId, channel_id: ChannelId) -> bool {
        self.channels.contains(&(guild_id, channel_id))
    }

    async fn send_message(&self, channel_id: ChannelId, content: String) -> Result<(), AppError> {
        self.record(GatewayCall::SendMessage {
            channel_id,
            content,
        })
    }

    async fn is_member(&self, guild_id: GuildId, user_id: UserId) -> Result<bool, AppError> {
        if self.fail_lookups {
            return Err(AppError::IoErr(io::Error::new(
                io::ErrorKind::TimedOut,
                "member lookup timed out",
            )));
        }

        Ok(self.members.contains(&(guild_id, user_id)))
    }

    async fn kick(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<(), AppError> {
        self.record(GatewayCall::Kick {
            guild_id,
            user_id,
            reason: reason.to_string(),
        })
    }

    async fn ban(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> Result<(), AppError> {
        self.record(GatewayCall::Ban {
            guild_id,
            user_id,
            reason: reason.to_string(),
        })
    }

    async fn delete_recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> Result<usize, AppError> {
        let history = self.history.get(&channel_id).cloned().unwrap_or_default();
        let newest = history.iter().rev().take(limit as usize).copied();
        let message_ids = bulk_deletable(newest, Timestamp::now());

        if message_ids.is_empty() {
            return Ok(0);
        }

        let deleted = message_ids.len();
        self.record(GatewayCall::DeleteMessages {
            channel_id,
            message_ids,
        })?;

        Ok(deleted)
    }
}
