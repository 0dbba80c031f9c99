use serenity::all::{
    CommandOptionType, CreateCommand, CreateCommandOption, GuildId, Mentionable, Permissions,
};
use serenity::async_trait;

use crate::bot::command::{CommandInvocation, Reply, SlashCommand};
use crate::bot::gateway::DiscordGateway;
use crate::error::AppError;
use crate::service::welcome::WelcomeSettingsService;

/// `/begruessung channel:<channel>` sets the guild's welcome channel.
pub struct WelcomeCommand {
    welcome: WelcomeSettingsService,
}

impl WelcomeCommand {
    pub fn new(welcome: WelcomeSettingsService) -> Self {
        Self { welcome }
    }
}

#[async_trait]
impl SlashCommand for WelcomeCommand {
    fn name(&self) -> &'static str {
        "begruessung"
    }

    fn definition(&self) -> CreateCommand {
        CreateCommand::new(self.name())
            .description("Setzt den Begrüßungs-Channel")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel für Begrüßungen",
                )
                .required(true),
            )
    }

    fn required_permission(&self) -> Permissions {
        Permissions::ADMINISTRATOR
    }

    fn permission_denied(&self) -> &'static str {
        "Du brauchst Admin-Rechte."
    }

    async fn execute(
        &self,
        invocation: &CommandInvocation,
        guild_id: GuildId,
        _gateway: &dyn DiscordGateway,
    ) -> Result<Reply, AppError> {
        let channel_id = invocation.channel("channel")?;

        if let Some(previous) = self.welcome.set(guild_id, channel_id).await {
            tracing::debug!(
                "Replaced welcome channel {} with {} in guild {}",
                previous,
                channel_id,
                guild_id
            );
        }
        tracing::info!("Welcome channel for guild {} set to {}", guild_id, channel_id);

        Ok(Reply::ephemeral(format!(
            "Begrüßungs-Channel wurde gesetzt: {}",
            channel_id.mention()
        )))
    }
}
