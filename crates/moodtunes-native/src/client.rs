use std::time::Duration;

use async_trait::async_trait;
use moodtunes_core::api::{self, CONTENT_TYPE_JSON};
use moodtunes_core::{DetectError, DetectionClient, DetectionRequest, DetectionResult};

/// Blocking HTTP client. Runs on the worker thread, never on the UI thread.
pub struct UreqClient {
    agent: ureq::Agent,
    url: String,
}

impl UreqClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        // Status codes are classified by the wire contract, not by ureq
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl DetectionClient for UreqClient {
    async fn detect(&self, request: &DetectionRequest) -> Result<DetectionResult, DetectError> {
        let body = api::encode_request(request)?;
        let mut response = self
            .agent
            .post(self.url.as_str())
            .header("Content-Type", CONTENT_TYPE_JSON)
            .send(body)
            .map_err(|err| DetectError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| DetectError::Transport(err.to_string()))?;
        tracing::debug!(status, bytes = text.len(), "detection response");
        api::classify_response(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::net::TcpListener;

    // A port that was just free and now has no listener
    fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn unreachable_server_is_a_transport_failure() {
        let url = format!("http://127.0.0.1:{}/detect_emotion", closed_port());
        let client = UreqClient::new(url, Duration::from_secs(2));
        let outcome = block_on(client.detect(&DetectionRequest::text("hello").unwrap()));
        assert!(matches!(outcome, Err(DetectError::Transport(_))));
    }
}
