//! streamfork routes records pulled from a stream-ingestion source into named
//! delivery channels.
//!
//! Records are grouped by a routing key extracted from tab-separated
//! `label:value` fields, split into count-bounded batches, and delivered
//! concurrently with bounded retry and a fallback-destination policy.
//!
//! Core modules:
//! - [`config`]: environment-loaded routing and channel configuration
//! - [`source`]: record ingestion seam (newline-delimited text)
//! - [`route`]: key extraction, destination resolution, and record grouping
//! - [`deliver`]: batch construction, channel transport, and concurrent
//!   dispatch with retry

pub mod cli;
pub mod config;
pub mod deliver;
pub mod route;
pub mod source;
