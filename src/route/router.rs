use super::extract::extract_value;
use super::resolve::resolve_destination;
use crate::config::RoutingConfig;
use std::collections::HashMap;

/// Destination channel name to the ordered records bound for it.
///
/// Relative input order is preserved within each destination's list.
pub type DestinationMap = HashMap<String, Vec<String>>;

/// Group records by destination channel name.
///
/// A non-empty `fixed_destination` overrides routing entirely: every record
/// lands in that single bucket. Otherwise each record's routing-label value
/// is extracted and rewritten into a destination name; records with no value
/// fall into the default destination.
pub fn route(records: Vec<String>, config: &RoutingConfig) -> DestinationMap {
    let mut map = DestinationMap::new();
    if records.is_empty() {
        return map;
    }

    if let Some(fixed) = config.fixed_destination.as_deref().filter(|d| !d.is_empty()) {
        map.insert(fixed.to_string(), records);
        return map;
    }

    for record in records {
        let destination = match extract_value(&record, &config.routing_label) {
            Some(value) if !value.is_empty() => resolve_destination(value, config),
            _ => config.default_destination.clone(),
        };
        map.entry(destination).or_default().push(record);
    }

    map
}
