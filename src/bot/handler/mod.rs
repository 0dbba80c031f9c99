use serenity::all::{Context, GuildId, Interaction, Member, Ready};
use serenity::async_trait;
use serenity::client::EventHandler;

use crate::bot::command::CommandRegistry;
use crate::bot::gateway::SerenityGateway;
use crate::service::welcome::WelcomeSettingsService;

pub mod interaction;
pub mod member;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub welcome: WelcomeSettingsService,
    pub commands: CommandRegistry,
    /// Guild the slash commands are registered in
    pub guild_id: GuildId,
}

impl Handler {
    pub fn new(welcome: WelcomeSettingsService, guild_id: GuildId) -> Self {
        Self {
            commands: CommandRegistry::new(welcome.clone()),
            welcome,
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        let gateway = SerenityGateway::new(ctx);
        ready::handle_ready(&gateway, ready, &self.commands, self.guild_id).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        let gateway = SerenityGateway::new(ctx);
        member::handle_guild_member_addition(
            &self.welcome,
            &gateway,
            new_member.guild_id,
            new_member.user.id,
        )
        .await;
    }

    /// Called when a slash command, component or modal is submitted
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(ctx, interaction, &self.commands).await;
    }
}
