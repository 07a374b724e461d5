use super::channel::{ChannelError, DeliveryChannel, PutBatchOutput};
use crate::config::ChannelConfig;
use async_trait::async_trait;
use serde::Serialize;

/// HTTP client for a delivery-channel service.
///
/// Destinations are addressed by name under the configured endpoint; the
/// channel's region (when set) travels as a request header.
#[derive(Debug, Clone)]
pub struct HttpChannel {
    client: reqwest::Client,
    endpoint: String,
    region: String,
}

#[derive(Serialize)]
struct PutBatchRequest<'a> {
    records: &'a [String],
}

impl HttpChannel {
    pub fn new(config: &ChannelConfig) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            region: config.region.clone(),
        })
    }
}

#[async_trait]
impl DeliveryChannel for HttpChannel {
    async fn put_batch(
        &self,
        destination: &str,
        records: &[String],
    ) -> Result<PutBatchOutput, ChannelError> {
        let url = format!("{}/v1/channels/{}/records", self.endpoint, destination);

        let mut request = self.client.post(&url).json(&PutBatchRequest { records });
        if !self.region.is_empty() {
            request = request.header("x-streamfork-region", &self.region);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ChannelError::DestinationNotFound(destination.to_string()));
        }

        if !response.status().is_success() {
            return Err(ChannelError::Transport(format!(
                "channel returned status {}: {}",
                response.status().as_u16(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::default_timeout;

    #[test]
    fn test_put_batch_request_wire_shape() {
        let records = vec!["a\n".to_string(), "b\n".to_string()];
        let body = serde_json::to_value(PutBatchRequest { records: &records }).unwrap();

        assert_eq!(body, serde_json::json!({ "records": ["a\n", "b\n"] }));
    }

    #[test]
    fn test_endpoint_trailing_slash_is_normalized() {
        let config = ChannelConfig {
            endpoint: "http://localhost:7600/".to_string(),
            region: "local".to_string(),
            timeout: default_timeout(),
        };

        let channel = HttpChannel::new(&config).unwrap();
        assert_eq!(channel.endpoint, "http://localhost:7600");
        assert_eq!(channel.region, "local");
    }
}
