use anyhow::{Context, Result};
use std::{env, str::FromStr};

use super::config_model::{Database, DotEnvyConfig, Server};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: env_or("SERVER_PORT", 8080)?,
        body_limit: env_or("SERVER_BODY_LIMIT", 10)?,
        timeout: env_or("SERVER_TIMEOUT", 30)?,
    };

    let database = Database {
        url: env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
        max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
        min_idle: env_or("DATABASE_MIN_IDLE", 10)?,
        max_lifetime: env_or("DATABASE_MAX_LIFETIME", 180)?,
        connection_timeout: env_or("DATABASE_CONNECTION_TIMEOUT", 30)?,
    };

    Ok(DotEnvyConfig { server, database })
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is invalid")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable names; the process environment is shared.

    #[test]
    fn missing_variable_falls_back_to_default() {
        unsafe {
            env::remove_var("CONFIG_TEST_MISSING_PORT");
        }
        let port: u16 = env_or("CONFIG_TEST_MISSING_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn present_variable_is_parsed() {
        unsafe {
            env::set_var("CONFIG_TEST_TIMEOUT", " 45 ");
        }
        let timeout: u64 = env_or("CONFIG_TEST_TIMEOUT", 30).unwrap();
        assert_eq!(timeout, 45);
    }

    #[test]
    fn unparsable_variable_names_the_key() {
        unsafe {
            env::set_var("CONFIG_TEST_BAD_LIMIT", "ten");
        }
        let err = env_or::<u64>("CONFIG_TEST_BAD_LIMIT", 10).unwrap_err();
        assert!(err.to_string().contains("CONFIG_TEST_BAD_LIMIT"));
    }
}
