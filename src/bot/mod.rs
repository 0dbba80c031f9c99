//! Discord bot integration: event handling, slash commands and Discord API access.
//!
//! The bot reacts to three gateway events:
//! - `ready` - logs the bot identity and registers the guild's slash commands
//! - `guild_member_addition` - posts the welcome message in the configured channel
//! - `interaction_create` - dispatches slash commands by name
//!
//! All Discord API access made on behalf of these events goes through
//! `gateway::DiscordGateway`, which lets the handlers be tested with a recording mock.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild and channel cache used to resolve the welcome channel
//! - `GUILD_MEMBERS` - Member join events and the member cache (privileged intent)
//! - `GUILD_MESSAGES` - Messages in guild channels
//! - `MESSAGE_CONTENT` - Message contents (privileged intent)

pub mod command;
pub mod gateway;
pub mod handler;
pub mod start;

#[cfg(test)]
mod test;
