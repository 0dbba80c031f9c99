//! Slash commands and the registry that dispatches to them.
//!
//! Every command implements `SlashCommand`, a common contract of name, registration
//! definition, required permission and an `execute` step that validates input, acts
//! through the `DiscordGateway` and produces exactly one `Reply`. The `CommandRegistry`
//! maps command names to handlers; adding a command means adding a handler, not
//! touching the dispatcher.
//!
//! User-facing text is German and kept literal for compatibility with existing
//! deployments.

pub mod clear;
pub mod moderation;
pub mod welcome;

use std::collections::HashMap;
use std::sync::Arc;

use serenity::all::{
    ChannelId, CommandInteraction, CreateCommand, GuildId, Permissions, ResolvedValue, UserId,
};
use serenity::async_trait;

use crate::bot::gateway::DiscordGateway;
use crate::error::AppError;
use crate::service::welcome::WelcomeSettingsService;

/// A user targeted by a command option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetUser {
    pub id: UserId,
    /// Display tag, `name` for migrated accounts or `name#1234` for legacy ones.
    pub tag: String,
}

/// Resolved value of a single slash command option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Channel(ChannelId),
    User(TargetUser),
    String(String),
    Integer(i64),
}

/// A single slash command invocation, decoupled from the Serenity payload.
///
/// Carries everything a handler needs to decide and act: the command name, where it
/// was invoked, the invoking member's effective permissions and the resolved options.
#[derive(Clone, Debug)]
pub struct CommandInvocation {
    pub name: String,
    /// `None` when the command was invoked outside a guild.
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub permissions: Permissions,
    pub options: HashMap<String, OptionValue>,
}

impl CommandInvocation {
    /// Converts a Serenity command interaction into an invocation.
    ///
    /// Option kinds the bot never registers (roles, attachments, numbers, ...) are
    /// dropped. A missing member means the command was not used in a guild, in which
    /// case the invoker has no permissions.
    pub fn from_interaction(interaction: &CommandInteraction) -> Self {
        let options = interaction
            .data
            .options()
            .into_iter()
            .filter_map(|option| {
                let value = match option.value {
                    ResolvedValue::Channel(channel) => OptionValue::Channel(channel.id),
                    ResolvedValue::User(user, _) => OptionValue::User(TargetUser {
                        id: user.id,
                        tag: user.tag(),
                    }),
                    ResolvedValue::String(value) => OptionValue::String(value.to_string()),
                    ResolvedValue::Integer(value) => OptionValue::Integer(value),
                    _ => return None,
                };

                Some((option.name.to_string(), value))
            })
            .collect();

        Self {
            name: interaction.data.name.clone(),
            guild_id: interaction.guild_id,
            channel_id: interaction.channel_id,
            permissions: interaction
                .member
                .as_ref()
                .and_then(|member| member.permissions)
                .unwrap_or_else(Permissions::empty),
            options,
        }
    }

    pub fn channel(&self, name: &'static str) -> Result<ChannelId, AppError> {
        match self.options.get(name) {
            Some(OptionValue::Channel(channel_id)) => Ok(*channel_id),
            _ => Err(AppError::MissingOption(name)),
        }
    }

    pub fn user(&self, name: &'static str) -> Result<&TargetUser, AppError> {
        match self.options.get(name) {
            Some(OptionValue::User(user)) => Ok(user),
            _ => Err(AppError::MissingOption(name)),
        }
    }

    pub fn integer(&self, name: &'static str) -> Result<i64, AppError> {
        match self.options.get(name) {
            Some(OptionValue::Integer(value)) => Ok(*value),
            _ => Err(AppError::MissingOption(name)),
        }
    }

    /// Optional string option; absent and blank values are both `None`.
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::String(value)) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

/// The single response sent for an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Visible only to the invoking user.
    pub ephemeral: bool,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// Contract shared by every slash command.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Name the command is registered and dispatched under.
    fn name(&self) -> &'static str;

    /// Registration payload submitted to Discord.
    fn definition(&self) -> CreateCommand;

    /// Permission the invoking member must hold before anything else happens.
    fn required_permission(&self) -> Permissions;

    /// Reply text used when the invoker lacks `required_permission`.
    fn permission_denied(&self) -> &'static str;

    /// Validates the invocation, performs the action and builds the reply.
    ///
    /// Only called after the permission check passed. Expected outcomes such as
    /// invalid input or a missing target are returned as `Ok` replies; `Err` is
    /// reserved for failed Discord calls and malformed payloads.
    async fn execute(
        &self,
        invocation: &CommandInvocation,
        guild_id: GuildId,
        gateway: &dyn DiscordGateway,
    ) -> Result<Reply, AppError>;
}

/// Checks a member's permissions the way Discord does: Administrator grants everything.
pub fn has_permission(granted: Permissions, required: Permissions) -> bool {
    granted.administrator() || granted.contains(required)
}

/// Name-indexed set of slash commands.
#[derive(Clone)]
pub struct CommandRegistry {
    /// Registration order, used when submitting definitions.
    commands: Vec<Arc<dyn SlashCommand>>,
    by_name: HashMap<&'static str, Arc<dyn SlashCommand>>,
}

impl CommandRegistry {
    /// Creates a registry without commands.
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Creates the registry with the bot's full command set.
    ///
    /// # Arguments
    /// - `welcome` - Settings store written by the `begruessung` command
    pub fn new(welcome: WelcomeSettingsService) -> Self {
        let mut registry = Self::empty();
        registry.register(welcome::WelcomeCommand::new(welcome));
        registry.register(moderation::ModerationCommand::kick());
        registry.register(moderation::ModerationCommand::ban());
        registry.register(clear::ClearCommand);
        registry
    }

    /// Adds a command, replacing any existing command with the same name.
    pub fn register(&mut self, command: impl SlashCommand + 'static) {
        let command: Arc<dyn SlashCommand> = Arc::new(command);
        let name = command.name();

        self.commands.retain(|existing| existing.name() != name);
        self.commands.push(command.clone());
        self.by_name.insert(name, command);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SlashCommand>> {
        self.by_name.get(name)
    }

    /// Registration payloads for every command, in registration order.
    pub fn definitions(&self) -> Vec<CreateCommand> {
        self.commands
            .iter()
            .map(|command| command.definition())
            .collect()
    }
}

/// Replaces the guild's slash commands with the registry's definitions.
///
/// Performs a single call; Discord swaps the whole guild command set atomically, so
/// repeating the call with an unchanged registry is idempotent. Failures are returned
/// to the caller, which logs them and carries on without retrying.
///
/// # Arguments
/// - `gateway` - Discord API access
/// - `guild_id` - Guild the commands are scoped to
/// - `registry` - Commands to register
pub async fn register_commands(
    gateway: &dyn DiscordGateway,
    guild_id: GuildId,
    registry: &CommandRegistry,
) -> Result<(), AppError> {
    tracing::info!("Registering commands...");

    gateway
        .set_guild_commands(guild_id, registry.definitions())
        .await?;

    tracing::info!("Commands registered.");

    Ok(())
}
