use serenity::model::id::UserId;

use std::env;

use thiserror::Error;

use crate::utils::validation;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'DISCORD_TOKEN' environment variable not set")]
    MissingToken,
    #[error("'{0}' must not be empty")]
    Empty(&'static str),
    #[error("'{var}' is not a snowflake ID: '{value}'")]
    BadSnowflake { var: &'static str, value: String },
    #[error("'{var}' is not a URL: '{value}'")]
    BadUrl { var: &'static str, value: String },
}

/// validated startup configuration, read once before the client connects
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    pub owner_id: Option<UserId>,
    pub error_webhook: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingToken)?;
        let prefix = env::var("BRINDLE_PREFIX").unwrap_or_else(|_| String::from("!"));
        let owner_id = env::var("BRINDLE_OWNER_ID").ok();
        let error_webhook = env::var("BRINDLE_ERROR_WEBHOOK").ok();
        Self::build(token, prefix, owner_id, error_webhook)
    }

    /// validates raw values into a `Config`, kept separate from the
    /// environment so it can be tested directly
    pub fn build(
        token: String,
        prefix: String,
        owner_id: Option<String>,
        error_webhook: Option<String>,
    ) -> Result<Self, ConfigError> {
        if token.trim().is_empty() {
            return Err(ConfigError::Empty("DISCORD_TOKEN"));
        }
        if prefix.is_empty() {
            return Err(ConfigError::Empty("BRINDLE_PREFIX"));
        }

        let owner_id = match owner_id {
            Some(raw) => {
                let id = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|_| validation::is_snowflake(&raw))
                    .ok_or_else(|| ConfigError::BadSnowflake {
                        var: "BRINDLE_OWNER_ID",
                        value: raw.clone(),
                    })?;
                Some(UserId::new(id))
            }
            None => None,
        };

        let error_webhook = match error_webhook {
            Some(url) => {
                if !validation::is_url(&url) {
                    return Err(ConfigError::BadUrl {
                        var: "BRINDLE_ERROR_WEBHOOK",
                        value: url,
                    });
                }
                Some(url)
            }
            None => None,
        };

        Ok(Self {
            token,
            prefix,
            owner_id,
            error_webhook,
        })
    }
}
