use super::batch::{build_batches, Batch};
use super::channel::{DeliveryChannel, PutBatchOutput};
use crate::route::DestinationMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Retry ceiling per original batch, shared across its whole retry chain.
pub const MAX_RETRY: usize = 5;

/// Fixed pause between retries. No backoff, no jitter.
pub const RETRY_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("delivery to '{destination}' failed after {attempts} attempts")]
    RetryExhausted { destination: String, attempts: usize },

    #[error("delivery task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// One in-flight batch and its position in the retry chain.
///
/// Sub-batches produced by partial-failure filtering inherit the counter;
/// it never resets.
#[derive(Debug)]
struct DeliveryAttempt {
    batch: Batch,
    retry_count: usize,
}

/// What a delivery attempt came back with, when it was not a full success.
#[derive(Debug)]
enum AttemptOutcome {
    /// The call itself failed (transport error or missing destination).
    CallFailed { destination_missing: bool },

    /// The call succeeded but rejected some records.
    PartialFailure(PutBatchOutput),
}

/// Executes batched deliveries concurrently with bounded retry.
///
/// Recoverable failures (missing destination, transport errors, per-record
/// rejections) are handled entirely inside the executor; only retry
/// exhaustion surfaces to the caller.
pub struct Dispatcher {
    channel: Arc<dyn DeliveryChannel>,
    default_destination: String,
    max_per_batch: usize,
}

impl Dispatcher {
    pub fn new(
        channel: Arc<dyn DeliveryChannel>,
        default_destination: impl Into<String>,
        max_per_batch: usize,
    ) -> Self {
        Self {
            channel,
            default_destination: default_destination.into(),
            max_per_batch,
        }
    }

    /// Deliver every destination's records, one concurrent task per batch.
    ///
    /// Waits for all tasks regardless of individual outcomes; a fatal abort
    /// in one task never cancels its siblings. Returns the first fatal error
    /// if any task exhausted its retries.
    pub async fn dispatch(&self, destinations: DestinationMap) -> Result<(), DispatchError> {
        let mut batches = Vec::new();
        for (destination, records) in destinations {
            batches.extend(build_batches(&destination, &records, self.max_per_batch));
        }

        debug!(batches = batches.len(), "Dispatching delivery batches");

        let mut handles = Vec::with_capacity(batches.len());
        for batch in batches {
            let channel = Arc::clone(&self.channel);
            let default_destination = self.default_destination.clone();
            handles.push(tokio::spawn(deliver_batch(
                channel,
                default_destination,
                batch,
            )));
        }

        let mut first_fatal = None;
        for result in futures::future::join_all(handles).await {
            if let Err(fatal) = result? {
                first_fatal.get_or_insert(fatal);
            }
        }

        match first_fatal {
            Some(fatal) => Err(fatal),
            None => Ok(()),
        }
    }
}

/// Drive one batch through the retry state machine until terminal success or
/// retry exhaustion.
async fn deliver_batch(
    channel: Arc<dyn DeliveryChannel>,
    default_destination: String,
    batch: Batch,
) -> Result<(), DispatchError> {
    let mut attempt = DeliveryAttempt {
        batch,
        retry_count: 0,
    };

    loop {
        let outcome = match channel
            .put_batch(&attempt.batch.destination, &attempt.batch.records)
            .await
        {
            Ok(output) if output.failed_count == 0 => {
                debug!(
                    batch_id = %attempt.batch.batch_id,
                    destination = %attempt.batch.destination,
                    records = attempt.batch.records.len(),
                    "Batch delivered"
                );
                return Ok(());
            }
            Ok(output) => {
                warn!(
                    batch_id = %attempt.batch.batch_id,
                    destination = %attempt.batch.destination,
                    failed_count = output.failed_count,
                    "Delivery reported failed records"
                );
                for (record, result) in attempt.batch.records.iter().zip(output.results.iter()) {
                    if result.is_failure() {
                        warn!(
                            destination = %attempt.batch.destination,
                            record = %record.trim_end(),
                            error_code = result.error_code.as_deref().unwrap_or(""),
                            error_message = result.error_message.as_deref().unwrap_or(""),
                            "Record delivery failed"
                        );
                    }
                }
                AttemptOutcome::PartialFailure(output)
            }
            Err(err) => {
                warn!(
                    batch_id = %attempt.batch.batch_id,
                    destination = %attempt.batch.destination,
                    attempt = attempt.retry_count + 1,
                    error = %err,
                    "Delivery call failed"
                );
                AttemptOutcome::CallFailed {
                    destination_missing: err.is_not_found(),
                }
            }
        };

        // Rewrites apply before the ceiling check, so a fatal report names
        // the destination the batch was bound for next.
        let next_batch = plan_retry(attempt.batch, &outcome, &default_destination);

        if attempt.retry_count >= MAX_RETRY {
            let attempts = attempt.retry_count + 1;
            error!(
                batch_id = %next_batch.batch_id,
                destination = %next_batch.destination,
                attempts,
                "Delivery retries exhausted, aborting batch"
            );
            return Err(DispatchError::RetryExhausted {
                destination: next_batch.destination,
                attempts,
            });
        }

        sleep(RETRY_INTERVAL).await;
        attempt = DeliveryAttempt {
            batch: next_batch,
            retry_count: attempt.retry_count + 1,
        };
    }
}

/// Decide what the next attempt looks like after a failed one.
///
/// A call-level failure retries the full batch; a partial failure retries
/// only the rejected records. Either way, a missing-destination error
/// rewrites the batch to the default destination, permanently for the rest
/// of the chain.
fn plan_retry(batch: Batch, outcome: &AttemptOutcome, default_destination: &str) -> Batch {
    match outcome {
        AttemptOutcome::CallFailed {
            destination_missing,
        } => Batch {
            batch_id: batch.batch_id,
            destination: if *destination_missing {
                default_destination.to_string()
            } else {
                batch.destination
            },
            records: batch.records,
        },
        AttemptOutcome::PartialFailure(output) => {
            let mut reroute = false;
            let records: Vec<String> = batch
                .records
                .into_iter()
                .zip(output.results.iter())
                .filter_map(|(record, result)| {
                    if !result.is_failure() {
                        return None;
                    }
                    reroute |= result.indicates_missing_destination();
                    Some(record)
                })
                .collect();

            Batch {
                batch_id: batch.batch_id,
                destination: if reroute {
                    default_destination.to_string()
                } else {
                    batch.destination
                },
                records,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliver::channel::RecordResult;

    fn batch(destination: &str, records: &[&str]) -> Batch {
        Batch::new(destination, records.iter().map(|r| r.to_string()).collect())
    }

    #[test]
    fn test_call_failure_retries_full_batch_unchanged() {
        let original = batch("orders", &["a\n", "b\n"]);
        let outcome = AttemptOutcome::CallFailed {
            destination_missing: false,
        };

        let retry = plan_retry(original.clone(), &outcome, "fallback");

        assert_eq!(retry, original);
    }

    #[test]
    fn test_missing_destination_rewrites_to_default() {
        let original = batch("orders", &["a\n"]);
        let outcome = AttemptOutcome::CallFailed {
            destination_missing: true,
        };

        let retry = plan_retry(original, &outcome, "fallback");

        assert_eq!(retry.destination, "fallback");
        assert_eq!(retry.records, vec!["a\n"]);
    }

    #[test]
    fn test_partial_failure_keeps_only_rejected_records() {
        let original = batch("orders", &["a\n", "b\n", "c\n", "d\n", "e\n"]);
        let output = PutBatchOutput {
            failed_count: 2,
            results: vec![
                RecordResult::success("id-1"),
                RecordResult::failure("ServiceUnavailable", "throttled"),
                RecordResult::success("id-3"),
                RecordResult::failure("ServiceUnavailable", "throttled"),
                RecordResult::success("id-5"),
            ],
        };

        let retry = plan_retry(original, &AttemptOutcome::PartialFailure(output), "fallback");

        assert_eq!(retry.destination, "orders");
        assert_eq!(retry.records, vec!["b\n", "d\n"]);
    }

    #[test]
    fn test_partial_failure_with_missing_destination_reroutes() {
        let original = batch("orders", &["a\n", "b\n"]);
        let output = PutBatchOutput {
            failed_count: 1,
            results: vec![
                RecordResult::success("id-1"),
                RecordResult::failure("ResourceNotFoundException", "no such channel"),
            ],
        };

        let retry = plan_retry(original, &AttemptOutcome::PartialFailure(output), "fallback");

        assert_eq!(retry.destination, "fallback");
        assert_eq!(retry.records, vec!["b\n"]);
    }

    #[test]
    fn test_retry_keeps_the_original_batch_id() {
        let original = batch("orders", &["a\n"]);
        let batch_id = original.batch_id;
        let outcome = AttemptOutcome::CallFailed {
            destination_missing: true,
        };

        assert_eq!(plan_retry(original, &outcome, "fallback").batch_id, batch_id);
    }
}
