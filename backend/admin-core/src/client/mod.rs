//! Resilient HTTP client for the admin API.
//!
//! # Features
//! - Bearer token attached from an injected [`TokenProvider`] at dispatch time
//! - Bounded retry with exponential backoff for transient failures
//! - 30 second per-request timeout (configurable)
//! - Correlation ids tying every attempt of an operation together in the logs
//!
//! # Operation lifecycle
//!
//! Each call to [`ApiClient::send`] runs one logical operation: dispatch,
//! then on a retryable failure (transport error, timeout, 5xx) sleep for the
//! next backoff delay and re-dispatch a successor descriptor, up to
//! `max_retries` times. Non-retryable failures (4xx, decode errors) and
//! exhausted retries surface the original error unchanged - callers cannot
//! tell "failed immediately" from "failed after retries" except through the
//! retry warnings in the log.

pub mod descriptor;
pub mod retry;

pub use descriptor::RequestDescriptor;
pub use retry::RetryPolicy;

use crate::config::ClientConfig;
use crate::credentials::TokenProvider;
use crate::error::api_client::ApiClientError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use backoff::backoff::Backoff;
use log::{trace, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep as TokioSleep;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const AUTHORIZATION_HEADER: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

/// Issues admin API requests with credential attachment and retry.
///
/// Cloning is cheap; clones share the connection pool and token provider.
/// Operations are independent: nothing is shared between concurrent `send`
/// calls beyond the read-only view of the provider.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Build a client with the default timeout and retry policy.
    pub fn new(
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiClientError> {
        Self::with_policy(
            base_url,
            tokens,
            RetryPolicy::default(),
            DEFAULT_TIMEOUT_DURATION,
        )
    }

    /// Build a client from a loaded [`ClientConfig`].
    pub fn from_config(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ApiClientError> {
        Self::with_policy(
            &config.base_url,
            tokens,
            config.retry_policy(),
            config.timeout(),
        )
    }

    /// Build a client with an explicit policy and timeout.
    pub fn with_policy(
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, ApiClientError> {
        let base_url = Url::parse(base_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client,
            tokens,
            retry,
        })
    }

    /// Issue one logical operation, retrying transient failures.
    ///
    /// Returns the parsed JSON payload on a 2xx response (an absent or empty
    /// body parses as `Value::Null`). On failure the caller receives the
    /// last error with status, status text, and raw body text preserved.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<Value, ApiClientError> {
        // Resolved once: every attempt re-dispatches to the same target.
        let url = self.resolve_url(descriptor.path())?;
        let mut schedule = self.retry.schedule();
        let mut descriptor = descriptor;

        loop {
            match self.dispatch(&url, &descriptor).await {
                Ok(payload) => return Ok(payload),
                Err(err) if err.is_retryable() && descriptor.attempt() < self.retry.max_retries => {
                    let delay = schedule
                        .next_backoff()
                        .unwrap_or(self.retry.initial_delay);
                    let next = descriptor.next_attempt();

                    warn!(
                        "Retrying {} {url} (attempt {}/{}) after {delay:?} [{}]: {err}",
                        next.method(),
                        next.attempt(),
                        self.retry.max_retries,
                        next.correlation_id(),
                    );

                    TokioSleep(delay).await;
                    descriptor = next;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// [`ApiClient::send`], deserializing the payload into `T`.
    pub async fn send_as<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiClientError> {
        let payload = self.send(descriptor).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// One attempt: attach credentials, dispatch, classify the outcome.
    async fn dispatch(
        &self,
        url: &Url,
        descriptor: &RequestDescriptor,
    ) -> Result<Value, ApiClientError> {
        trace!(
            "Dispatching {} {url} (attempt {}) [{}]",
            descriptor.method(),
            descriptor.attempt(),
            descriptor.correlation_id(),
        );

        let mut request = self.client.request(descriptor.method().clone(), url.clone());

        // Token is re-read on every attempt: a rotation between retries
        // takes effect on the next dispatch.
        if let Some(token) = self.tokens.current_token() {
            request = request.header(
                AUTHORIZATION_HEADER,
                format!("{BEARER_PREFIX}{}", token.as_str()),
            );
        }

        for (name, value) in descriptor.headers() {
            request = request.header(name, value);
        }

        if let Some(body) = descriptor.body() {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiClientError::Status {
                status: HttpStatusCode::from(status.as_u16()),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Resolve a descriptor path against the base URL.
    ///
    /// Absolute URLs pass through untouched so callers can follow
    /// server-provided links.
    fn resolve_url(&self, path: &str) -> Result<Url, ApiClientError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }
        Ok(self.base_url.join(path)?)
    }
}
