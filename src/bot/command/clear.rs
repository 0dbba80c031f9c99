use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption, GuildId, Permissions};
use serenity::async_trait;

use crate::bot::command::{CommandInvocation, Reply, SlashCommand};
use crate::bot::gateway::DiscordGateway;
use crate::error::AppError;

/// Largest number of messages a single bulk delete accepts.
pub const MAX_CLEAR: i64 = 100;

/// `/clear anzahl:<1..100>` bulk deletes the newest messages of the invoking channel.
pub struct ClearCommand;

#[async_trait]
impl SlashCommand for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn definition(&self) -> CreateCommand {
        CreateCommand::new(self.name())
            .description("Löscht Nachrichten")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "anzahl", "Anzahl")
                    .required(true),
            )
    }

    fn required_permission(&self) -> Permissions {
        Permissions::MANAGE_MESSAGES
    }

    fn permission_denied(&self) -> &'static str {
        "Du brauchst die Rechte: Nachrichten verwalten."
    }

    async fn execute(
        &self,
        invocation: &CommandInvocation,
        guild_id: GuildId,
        gateway: &dyn DiscordGateway,
    ) -> Result<Reply, AppError> {
        let count = invocation.integer("anzahl")?;

        let limit = match u8::try_from(count) {
            Ok(limit) if (1..=MAX_CLEAR).contains(&count) => limit,
            _ => return Ok(Reply::ephemeral("Bitte eine Zahl zwischen 1 und 100.")),
        };

        let deleted = gateway
            .delete_recent_messages(invocation.channel_id, limit)
            .await?;

        tracing::info!(
            "Cleared {} of {} requested messages in channel {} of guild {}",
            deleted,
            count,
            invocation.channel_id,
            guild_id
        );

        Ok(Reply::ephemeral(format!("🔧 {} Nachrichten gelöscht.", count)))
    }
}
