//! Rate-limited HTTP transport
//!
//! Owns the single outbound channel to the remote endpoint. Every call
//! passes through the rate limiter, performs exactly one HTTP POST, and
//! classifies the outcome into a [`GenerationError`] or the generated text.
//! No retries, no caching.

use crate::api::error::GenerationError;
use crate::api::rate_limit::RateLimiter;
use crate::config::ApiConfig;
use futures::future::BoxFuture;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Connect timeout for the outbound HTTP call.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The outbound channel to the text-generation endpoint.
///
/// Implemented by [`HttpTransport`] in production and by recording fakes in
/// tests. `send` performs at most one network call and always returns a
/// classified outcome; implementations never panic across this boundary.
pub trait Transport: Send + Sync {
    fn send<'a>(
        &'a self,
        payload: Value,
        config: &'a ApiConfig,
    ) -> BoxFuture<'a, Result<String, GenerationError>>;
}

/// Production transport: rate-limited POSTs via `reqwest`.
pub struct HttpTransport {
    http: reqwest::Client,
    limiter: RateLimiter,
}

impl HttpTransport {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("reqwest client build failed, falling back to default client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            limiter: RateLimiter::default(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        payload: Value,
        config: &'a ApiConfig,
    ) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(async move {
            let Some(api_key) = config.api_key.as_deref().filter(|key| !key.is_empty()) else {
                return Err(GenerationError::Unconfigured);
            };

            self.limiter.acquire().await;

            debug!("POST {} body={}", config.endpoint, payload);
            let response = self
                .http
                .post(&config.endpoint)
                .bearer_auth(api_key)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(&payload)
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            debug!("Response status={} body={}", status, body);

            classify_response(status, &body)
        })
    }
}

/// Classify an HTTP response into generated text or a failure.
///
/// On 200, the generated text is looked up under `text` and then the
/// fallback `response` field, and trimmed. All other statuses map onto the
/// error taxonomy.
pub fn classify_response(status: u16, body: &str) -> Result<String, GenerationError> {
    match status {
        200 => {
            let json: Value = serde_json::from_str(body)
                .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

            json.get("text")
                .or_else(|| json.get("response"))
                .and_then(Value::as_str)
                .map(|text| text.trim().to_string())
                .ok_or_else(|| {
                    GenerationError::MalformedResponse(
                        "response contains neither 'text' nor 'response' field".to_string(),
                    )
                })
        }
        429 => Err(GenerationError::RateLimited),
        401 => Err(GenerationError::Unauthorized),
        status => Err(GenerationError::Server {
            status,
            body: body.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::payload::chat_payload;

    #[test]
    fn test_success_extracts_text_field() {
        let result = classify_response(200, r#"{"text": "  generated text  "}"#);
        assert_eq!(result.unwrap(), "generated text");
    }

    #[test]
    fn test_success_falls_back_to_response_field() {
        let result = classify_response(200, r#"{"response": "other shape"}"#);
        assert_eq!(result.unwrap(), "other shape");
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let result = classify_response(200, r#"{"output": "nope"}"#);
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let result = classify_response(200, "<html>gateway</html>");
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[test]
    fn test_status_429_is_rate_limited() {
        let result = classify_response(429, "slow down");
        assert!(matches!(result, Err(GenerationError::RateLimited)));
    }

    #[test]
    fn test_status_401_is_unauthorized() {
        let result = classify_response(401, "bad key");
        assert!(matches!(result, Err(GenerationError::Unauthorized)));
    }

    #[test]
    fn test_other_statuses_carry_status_and_body() {
        match classify_response(503, "overloaded") {
            Err(GenerationError::Server { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_send_makes_no_network_call() {
        let transport = HttpTransport::new();
        let config = ApiConfig::default();
        assert!(!config.is_configured());

        let payload = chat_payload("p", "x", 500, 0.7);
        let result = transport.send(payload, &config).await;
        assert!(matches!(result, Err(GenerationError::Unconfigured)));
    }
}
