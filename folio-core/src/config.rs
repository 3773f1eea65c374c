//! Runtime configuration read from the environment.

use std::{env, time::Duration};

use thiserror::Error;

use crate::cooldown::DEFAULT_COOLDOWN;

/// Idle timeout used when `PAGINATION_IDLE_SECS` is unset.
pub const DEFAULT_PAGINATION_IDLE: Duration = Duration::from_secs(60);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),
    #[error("environment variable `{name}` must be a positive number of seconds, got `{value}`")]
    InvalidSeconds { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub pagination_idle: Duration,
    pub command_cooldown: Duration,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .map(|token| token.trim().to_owned())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        Ok(Self {
            discord_token,
            pagination_idle: seconds(&lookup, "PAGINATION_IDLE_SECS", DEFAULT_PAGINATION_IDLE)?,
            command_cooldown: seconds(&lookup, "COMMAND_COOLDOWN_SECS", DEFAULT_COOLDOWN)?,
        })
    }
}

fn seconds<F>(lookup: &F, name: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };

    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { name, value }),
    }
}
