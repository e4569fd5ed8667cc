use crate::app_config::{
    AppConfig, Environment, FetchSettings, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SUPSCOUT_ENV", "development"))?;

    let mut bind_addr = or_default("SUPSCOUT_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "SUPSCOUT_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    // Hosting platforms hand out the port through a bare `PORT` variable.
    if let Ok(raw_port) = lookup("PORT") {
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "PORT".to_string(),
                reason: e.to_string(),
            })?;
        bind_addr.set_port(port);
    }

    let log_level = or_default("SUPSCOUT_LOG_LEVEL", "info");

    let timeout_secs = parse_u64("SUPSCOUT_FETCH_TIMEOUT_SECS", "12")?;
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SUPSCOUT_FETCH_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("SUPSCOUT_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_language = or_default("SUPSCOUT_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE);

    let self_ping_url = lookup("SUPSCOUT_SELF_PING_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty());
    let self_ping_interval_secs = parse_u64("SUPSCOUT_SELF_PING_INTERVAL_SECS", "300")?;
    if self_ping_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SUPSCOUT_SELF_PING_INTERVAL_SECS".to_string(),
            reason: "interval must be at least 1 second".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fetch: FetchSettings {
            timeout_secs,
            user_agent,
            accept_language,
        },
        self_ping_url,
        self_ping_interval_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than the three
/// known environment names.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SUPSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
