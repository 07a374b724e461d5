use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("destination '{0}' not found")]
    DestinationNotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl ChannelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChannelError::DestinationNotFound(_))
    }
}

/// Per-record outcome of a batch put, parallel to the sent records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordResult {
    #[serde(default)]
    pub record_id: Option<String>,

    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl RecordResult {
    pub fn success(record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record_id: None,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }

    /// A record failed if it carries an error code, an error message, or no
    /// assigned record id.
    pub fn is_failure(&self) -> bool {
        self.error_code.is_some() || self.error_message.is_some() || self.record_id.is_none()
    }

    /// Whether this record's error reports the destination itself missing,
    /// as opposed to a per-record rejection.
    pub fn indicates_missing_destination(&self) -> bool {
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|text| text.contains("ResourceNotFound"))
        };
        contains(&self.error_code) || contains(&self.error_message)
    }
}

/// Result of one batch put. `failed_count` is zero on full success; otherwise
/// `results` identifies which records were rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutBatchOutput {
    pub failed_count: usize,

    #[serde(default)]
    pub results: Vec<RecordResult>,
}

impl PutBatchOutput {
    pub fn all_succeeded(record_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            failed_count: 0,
            results: record_ids.into_iter().map(RecordResult::success).collect(),
        }
    }
}

/// A named sink that accepts batched record payloads.
///
/// Fails with [`ChannelError::DestinationNotFound`] when the destination does
/// not exist and [`ChannelError::Transport`] for any other call-level
/// failure. A successful call may still report rejected records through the
/// returned [`PutBatchOutput`].
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn put_batch(
        &self,
        destination: &str,
        records: &[String],
    ) -> Result<PutBatchOutput, ChannelError>;
}
