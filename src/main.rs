mod bot;
mod config;
mod error;
mod router;
mod service;
mod startup;

use crate::{config::Config, error::AppError, service::welcome::WelcomeSettingsService};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    tracing::info!("Starting Ronin Warden v{}", env!("CARGO_PKG_VERSION"));

    if let Some(port) = config.port {
        tokio::spawn(async move {
            if let Err(e) = startup::serve_health(port).await {
                tracing::error!("Health server error: {}", e);
            }
        });
    }

    let welcome = WelcomeSettingsService::new();
    let client = bot::start::init_bot(&config, welcome).await?;

    bot::start::start_bot(client).await
}
