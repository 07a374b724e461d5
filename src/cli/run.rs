use crate::config::{load_from_env, ConfigError};
use crate::deliver::{ChannelError, DispatchError, Dispatcher, HttpChannel, MAX_RECORDS_PER_BATCH};
use crate::route::route;
use crate::source::{read_records, ReaderError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("source reader error: {0}")]
    Reader(#[from] ReaderError),

    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// One invocation: load config, read records, route, and dispatch.
///
/// Normal completion is silent beyond info logs. A retry-ceiling breach in
/// any delivery task surfaces as an error here, after every sibling task has
/// finished.
pub async fn run(input: Option<PathBuf>) -> Result<(), RunError> {
    let config = load_from_env()?;

    info!(
        endpoint = %config.channel.endpoint,
        region = %config.channel.region,
        fixed_destination = config.routing.fixed_destination.as_deref().unwrap_or(""),
        default_destination = %config.routing.default_destination,
        routing_label = %config.routing.routing_label,
        strip_prefix = %config.routing.strip_prefix,
        add_prefix = %config.routing.add_prefix,
        substitutions = config.routing.substitutions.len(),
        "Loaded configuration from environment"
    );

    let records = read_records(input.as_deref())?;
    info!(count = records.len(), "Read input records");

    if records.is_empty() {
        info!("No records to deliver");
        return Ok(());
    }

    let destinations = route(records, &config.routing);
    info!(destinations = destinations.len(), "Routed records");

    let channel = Arc::new(HttpChannel::new(&config.channel)?);
    let dispatcher = Dispatcher::new(
        channel,
        config.routing.default_destination.clone(),
        MAX_RECORDS_PER_BATCH,
    );

    dispatcher.dispatch(destinations).await?;

    info!("All batches delivered");
    Ok(())
}
