pub mod env;
pub mod types;

pub use env::{load_from_env, parse_substitution_rules, ConfigError};
pub use types::{ChannelConfig, Config, RoutingConfig, SubstitutionRule};
