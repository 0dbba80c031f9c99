use super::*;
use crate::bot::handler::member::{handle_guild_member_addition, welcome_message};

fn newcomer() -> UserId {
    UserId::new(500_000_000_000_000_005)
}

/// Tests a join in a guild without a welcome channel.
///
/// Expected: no messages sent
#[tokio::test]
async fn skips_unconfigured_guild() {
    let welcome = WelcomeSettingsService::new();
    let gateway = MockGateway::new().with_channel(guild(), general());

    handle_guild_member_addition(&welcome, &gateway, guild(), newcomer()).await;

    assert!(gateway.calls().is_empty());
}

/// Tests a join when the configured channel has since been deleted.
///
/// Expected: no messages sent and no panic
#[tokio::test]
async fn skips_unresolvable_channel() {
    let welcome = WelcomeSettingsService::new();
    welcome.set(guild(), general()).await;
    let gateway = MockGateway::new();

    handle_guild_member_addition(&welcome, &gateway, guild(), newcomer()).await;

    assert!(gateway.calls().is_empty());
}

/// Tests a join in a guild with a welcome channel.
///
/// Expected: exactly one message to the welcome channel mentioning the new member
#[tokio::test]
async fn welcomes_new_member() {
    let welcome = WelcomeSettingsService::new();
    welcome.set(guild(), general()).await;
    let gateway = MockGateway::new().with_channel(guild(), general());

    handle_guild_member_addition(&welcome, &gateway, guild(), newcomer()).await;

    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::SendMessage {
            channel_id: general(),
            content: welcome_message(newcomer()),
        }]
    );
}

/// Tests that a welcome channel only applies to its own guild.
///
/// Expected: no messages sent for a join in another guild
#[tokio::test]
async fn ignores_other_guilds_setting() {
    let other_guild = GuildId::new(600_000_000_000_000_006);
    let welcome = WelcomeSettingsService::new();
    welcome.set(guild(), general()).await;
    let gateway = MockGateway::new().with_channel(guild(), general());

    handle_guild_member_addition(&welcome, &gateway, other_guild, newcomer()).await;

    assert!(gateway.calls().is_empty());
}

/// Tests that a failed send is swallowed.
///
/// Expected: no panic and nothing recorded
#[tokio::test]
async fn send_failure_is_not_fatal() {
    let welcome = WelcomeSettingsService::new();
    welcome.set(guild(), general()).await;
    let gateway = MockGateway::new()
        .with_channel(guild(), general())
        .failing();

    handle_guild_member_addition(&welcome, &gateway, guild(), newcomer()).await;

    assert!(gateway.calls().is_empty());
}

/// Tests the welcome message text.
///
/// Expected: the literal greeting with the member mention
#[test]
fn welcome_message_mentions_member() {
    assert_eq!(
        welcome_message(newcomer()),
        "Willkommen in **Ronin Realm | 浪人界**, <@500000000000000005>! 🥷\n\nBitte lies die Regeln und stell dich kurz vor."
    );
}
