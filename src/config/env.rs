use super::types::{default_timeout, ChannelConfig, Config, RoutingConfig, SubstitutionRule};
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const ENV_FIXED_DESTINATION: &str = "STREAMFORK_FIXED_DESTINATION";
pub const ENV_DEFAULT_DESTINATION: &str = "STREAMFORK_DEFAULT_DESTINATION";
pub const ENV_ROUTING_LABEL: &str = "STREAMFORK_ROUTING_LABEL";
pub const ENV_STRIP_PREFIX: &str = "STREAMFORK_STRIP_PREFIX";
pub const ENV_ADD_PREFIX: &str = "STREAMFORK_ADD_PREFIX";
pub const ENV_SUBSTITUTIONS: &str = "STREAMFORK_SUBSTITUTIONS";
pub const ENV_ENDPOINT: &str = "STREAMFORK_ENDPOINT";
pub const ENV_REGION: &str = "STREAMFORK_REGION";
pub const ENV_TIMEOUT_SECONDS: &str = "STREAMFORK_TIMEOUT_SECONDS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Load the full configuration from process environment variables.
///
/// Loaded once at startup; the resulting config is immutable for the
/// lifetime of the invocation.
pub fn load_from_env() -> Result<Config, ConfigError> {
    load_from(|key| env::var(key).ok())
}

pub(crate) fn load_from<F>(get: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let nonempty = |key: &str| get(key).filter(|v| !v.is_empty());

    let fixed_destination = nonempty(ENV_FIXED_DESTINATION);
    let routing_label = nonempty(ENV_ROUTING_LABEL).unwrap_or_default();

    let default_destination =
        nonempty(ENV_DEFAULT_DESTINATION).ok_or(ConfigError::MissingVar(ENV_DEFAULT_DESTINATION))?;

    if fixed_destination.is_none() && routing_label.is_empty() {
        return Err(ConfigError::Invalid {
            var: ENV_ROUTING_LABEL,
            message: format!("required when {ENV_FIXED_DESTINATION} is not set"),
        });
    }

    let endpoint = nonempty(ENV_ENDPOINT).ok_or(ConfigError::MissingVar(ENV_ENDPOINT))?;

    let timeout = match nonempty(ENV_TIMEOUT_SECONDS) {
        Some(raw) => {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                var: ENV_TIMEOUT_SECONDS,
                message: format!("expected a whole number of seconds, got '{raw}'"),
            })?;
            Duration::from_secs(secs)
        }
        None => default_timeout(),
    };

    Ok(Config {
        routing: RoutingConfig {
            fixed_destination,
            routing_label,
            default_destination,
            strip_prefix: get(ENV_STRIP_PREFIX).unwrap_or_default(),
            add_prefix: get(ENV_ADD_PREFIX).unwrap_or_default(),
            substitutions: parse_substitution_rules(&get(ENV_SUBSTITUTIONS).unwrap_or_default()),
        },
        channel: ChannelConfig {
            endpoint,
            region: get(ENV_REGION).unwrap_or_default(),
            timeout,
        },
    })
}

/// Parse the delimited substitution-rule setting.
///
/// Rules are comma-separated `match/replacement` pairs; the first `/` splits
/// match from replacement. Entries without a `/` are dropped silently.
pub fn parse_substitution_rules(raw: &str) -> Vec<SubstitutionRule> {
    raw.split(',')
        .filter_map(|entry| {
            let (matched, replacement) = entry.split_once('/')?;
            Some(SubstitutionRule {
                matched: matched.to_string(),
                replacement: replacement.to_string(),
            })
        })
        .collect()
}
