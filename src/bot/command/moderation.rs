use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, GuildId, Permissions};
use serenity::async_trait;

use crate::bot::command::{CommandInvocation, Reply, SlashCommand};
use crate::bot::gateway::DiscordGateway;
use crate::error::AppError;

/// Reason recorded in the audit log when the moderator gives none.
pub const DEFAULT_REASON: &str = "Kein Grund angegeben";

pub const MEMBER_NOT_FOUND: &str = "Mitglied nicht gefunden.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModerationAction {
    Kick,
    Ban,
}

/// `/kick` and `/ban`, which differ only in the action taken and the wording.
///
/// Both take a required `user` and an optional `grund` and refuse to act on users who
/// are not currently members of the guild.
pub struct ModerationCommand {
    action: ModerationAction,
}

impl ModerationCommand {
    pub fn kick() -> Self {
        Self {
            action: ModerationAction::Kick,
        }
    }

    pub fn ban() -> Self {
        Self {
            action: ModerationAction::Ban,
        }
    }
}

#[async_trait]
impl SlashCommand for ModerationCommand {
    fn name(&self) -> &'static str {
        match self.action {
            ModerationAction::Kick => "kick",
            ModerationAction::Ban => "ban",
        }
    }

    fn definition(&self) -> CreateCommand {
        let (description, user_description) = match self.action {
            ModerationAction::Kick => ("Kickt ein Mitglied", "Zu kickendes Mitglied"),
            ModerationAction::Ban => ("Bannt ein Mitglied", "Zu bannendes Mitglied"),
        };

        CreateCommand::new(self.name())
            .description(description)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", user_description)
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "grund", "Grund")
                    .required(false),
            )
    }

    fn required_permission(&self) -> Permissions {
        match self.action {
            ModerationAction::Kick => Permissions::KICK_MEMBERS,
            ModerationAction::Ban => Permissions::BAN_MEMBERS,
        }
    }

    fn permission_denied(&self) -> &'static str {
        match self.action {
            ModerationAction::Kick => "Du brauchst die Rechte: Kick Members.",
            ModerationAction::Ban => "Du brauchst die Rechte: Ban Members.",
        }
    }

    async fn execute(
        &self,
        invocation: &CommandInvocation,
        guild_id: GuildId,
        gateway: &dyn DiscordGateway,
    ) -> Result<Reply, AppError> {
        let user = invocation.user("user")?;
        let reason = invocation.string("grund").unwrap_or(DEFAULT_REASON);

        if !gateway.is_member(guild_id, user.id).await? {
            return Ok(Reply::ephemeral(MEMBER_NOT_FOUND));
        }

        let verb = match self.action {
            ModerationAction::Kick => {
                gateway.kick(guild_id, user.id, reason).await?;
                "gekickt"
            }
            ModerationAction::Ban => {
                gateway.ban(guild_id, user.id, reason).await?;
                "gebannt"
            }
        };

        tracing::info!(
            "{:?}: user {} ({}) in guild {}, reason: {}",
            self.action,
            user.tag,
            user.id,
            guild_id,
            reason
        );

        Ok(Reply::public(format!(
            "**{}** wurde {}.\nGrund: {}",
            user.tag, verb, reason
        )))
    }
}
