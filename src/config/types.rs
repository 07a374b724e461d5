use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub routing: RoutingConfig,
    pub channel: ChannelConfig,
}

/// How records map to destination channel names.
///
/// When `fixed_destination` is set and non-empty, every record routes there
/// unconditionally and the remaining fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub fixed_destination: Option<String>,

    /// Field label whose value seeds the destination name.
    #[serde(default)]
    pub routing_label: String,

    /// Bucket for records without a routing value, and the reroute target
    /// when a resolved destination turns out not to exist.
    pub default_destination: String,

    /// Removed from the routing value when it appears as a leading prefix.
    #[serde(default)]
    pub strip_prefix: String,

    /// Prepended to the resolved destination name.
    #[serde(default)]
    pub add_prefix: String,

    /// Applied in order, each replacing the first occurrence of its match.
    #[serde(default)]
    pub substitutions: Vec<SubstitutionRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub matched: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Base URL of the delivery-channel service.
    pub endpoint: String,

    /// Channel-location parameter, forwarded with each request when set.
    #[serde(default)]
    pub region: String,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

pub(crate) fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
