//! Slash command dispatch.
//!
//! Every recognised command invocation passes through `dispatch`, which enforces the
//! ordering all commands share: permission check, then the command's own validation
//! and action, then exactly one reply. Errors from Discord calls made by a command are
//! caught here and turned into a uniform ephemeral failure reply, so no code path
//! leaves the invoker without an answer.

use serenity::all::{
    CommandInteraction, CommandType, Context, CreateInteractionResponse,
    CreateInteractionResponseMessage, Interaction,
};

use crate::bot::command::{has_permission, CommandInvocation, CommandRegistry, Reply};
use crate::bot::gateway::{DiscordGateway, SerenityGateway};

pub const ACTION_FAILED: &str = "Die Aktion konnte nicht ausgeführt werden.";

pub const GUILD_ONLY: &str = "Dieser Befehl funktioniert nur auf einem Server.";

/// Routes an invocation to its command and produces the reply to send.
///
/// # Arguments
/// - `registry` - Commands known to the bot
/// - `invocation` - The invocation to handle
/// - `gateway` - Discord API access handed to the command
///
/// # Returns
/// - `Some(Reply)` - The single reply for a recognised command
/// - `None` - Unknown command name, nothing is sent
pub async fn dispatch(
    registry: &CommandRegistry,
    invocation: &CommandInvocation,
    gateway: &dyn DiscordGateway,
) -> Option<Reply> {
    let command = registry.get(invocation.name.as_str())?;

    if !has_permission(invocation.permissions, command.required_permission()) {
        return Some(Reply::ephemeral(command.permission_denied()));
    }

    let Some(guild_id) = invocation.guild_id else {
        return Some(Reply::ephemeral(GUILD_ONLY));
    };

    match command.execute(invocation, guild_id, gateway).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            tracing::error!(
                "Command /{} failed in guild {}: {:?}",
                invocation.name,
                guild_id,
                e
            );
            Some(Reply::ephemeral(ACTION_FAILED))
        }
    }
}

/// Narrows an interaction to a chat input (slash) command.
///
/// Context menu commands, components, modals and autocomplete requests yield `None`.
pub fn chat_input_command(interaction: &Interaction) -> Option<&CommandInteraction> {
    match interaction {
        Interaction::Command(command) if command.data.kind == CommandType::ChatInput => {
            Some(command)
        }
        _ => None,
    }
}

/// Converts an interaction into an invocation if it is a chat input command.
pub fn invocation_from(interaction: &Interaction) -> Option<CommandInvocation> {
    chat_input_command(interaction).map(CommandInvocation::from_interaction)
}

/// Handles the interaction_create event
///
/// Anything other than a chat input command is ignored without a reply.
pub async fn handle_interaction_create(
    ctx: Context,
    interaction: Interaction,
    registry: &CommandRegistry,
) {
    let Some(command) = chat_input_command(&interaction) else {
        return;
    };

    let invocation = CommandInvocation::from_interaction(command);
    let gateway = SerenityGateway::new(ctx.clone());

    let Some(reply) = dispatch(registry, &invocation, &gateway).await else {
        return;
    };

    send_reply(&ctx, command, reply).await;
}

async fn send_reply(ctx: &Context, command: &CommandInteraction, reply: Reply) {
    let message = CreateInteractionResponseMessage::new()
        .content(reply.content)
        .ephemeral(reply.ephemeral);

    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        tracing::error!(
            "Failed to respond to /{} interaction {}: {:?}",
            command.data.name,
            command.id,
            e
        );
    }
}
