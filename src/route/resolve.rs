use crate::config::RoutingConfig;

/// Rewrite an extracted routing value into a destination channel name.
///
/// In order: strip the configured prefix if present, apply each substitution
/// rule to the first occurrence of its match, then prepend the add-prefix.
/// Substitutions are independent single passes in list order, not iterative
/// re-scans. The result is not validated; any string, including the empty
/// string, is a legal destination name.
pub fn resolve_destination(value: &str, config: &RoutingConfig) -> String {
    let mut result = if !config.strip_prefix.is_empty() && value.starts_with(&config.strip_prefix) {
        value.replacen(&config.strip_prefix, "", 1)
    } else {
        value.to_string()
    };

    for rule in &config.substitutions {
        result = result.replacen(&rule.matched, &rule.replacement, 1);
    }

    format!("{}{}", config.add_prefix, result)
}
