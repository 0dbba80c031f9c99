use serenity::all::{ApplicationId, GuildId};

use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub token: String,

    pub client_id: ApplicationId,
    pub guild_id: GuildId,

    /// Port for the health server; the server is not started when unset.
    pub port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones, matching how most hosting
    /// platforms render blank dashboard fields.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &str| {
            var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        Ok(Self {
            token: required("TOKEN")?,
            client_id: ApplicationId::new(parse_snowflake("CLIENT_ID", required("CLIENT_ID")?)?),
            guild_id: GuildId::new(parse_snowflake("GUILD_ID", required("GUILD_ID")?)?),
            port: var("PORT")
                .map(|value| {
                    value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidEnvVar {
                        name: "PORT".to_string(),
                        value,
                    })
                })
                .transpose()?,
        })
    }
}

/// Parses a Discord snowflake, rejecting zero since serenity ids are non-zero.
fn parse_snowflake(name: &str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}
