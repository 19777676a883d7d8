//! Executors for `HttpRequest` values.
//!
//! # Design
//! `Transport` is the only seam that touches the network. Implementations
//! report a transport-level failure as `ApiError::Unreachable` and otherwise
//! hand back whatever status and body they got; `Transport::get` applies the
//! shared status classification from `HttpResponse::into_body`.
//!
//! A transport instance is shared by every in-flight call of a client, so
//! implementations must be `Send + Sync`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request`. Fails only with `ApiError::Unreachable`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;

    /// Execute `request` and return the body of a 200 response.
    async fn get(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError> {
        self.send(request).await?.into_body()
    }
}

/// Largest response body `UreqTransport` reads by default.
pub const DEFAULT_BODY_LIMIT: u64 = 10 * 1024 * 1024;

/// Live transport backed by a blocking `ureq` agent.
///
/// Each call runs on tokio's blocking pool, so it must be awaited inside a
/// tokio runtime. Non-2xx statuses are returned as data rather than errors.
/// A body longer than the body limit cannot be read in full and is reported
/// as `Unreachable`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::with_agent(agent)
    }

    /// Use a preconfigured agent (timeouts, proxy, TLS). The agent should
    /// have `http_status_as_error(false)` so statuses reach the classifier.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Read response bodies of up to `bytes` bytes.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    body_limit: u64,
    request: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let mut builder = agent.get(request.url.as_str());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let mut response = builder
        .call()
        .map_err(|e| ApiError::Unreachable(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_vec()
        .map_err(|e| ApiError::Unreachable(e.to_string()))?;

    Ok(HttpResponse::new(status, body))
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(host = request.url.host_str(), path = request.url.path(), "sending request");
        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        let response = tokio::task::spawn_blocking(move || execute_blocking(&agent, body_limit, &request))
            .await
            .map_err(|e| ApiError::Unreachable(e.to_string()))??;
        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

/// Canned reply for `StubTransport`: an optional transport error, a status,
/// and a body. A present error wins over the status and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubReply {
    pub error: Option<String>,
    pub status: u16,
    pub body: Vec<u8>,
}

impl StubReply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            error: None,
            status,
            body: body.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            status: 0,
            body: Vec::new(),
        }
    }
}

/// Deterministic transport mapping request URLs to canned replies.
///
/// URLs without a registered reply use the fallback, or fail with
/// `Unreachable` when none is set. Every requested URL is recorded.
#[derive(Debug, Default)]
pub struct StubTransport {
    replies: HashMap<String, StubReply>,
    fallback: Option<StubReply>,
    requests: Mutex<Vec<Url>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, url: impl Into<String>, reply: StubReply) -> Self {
        self.replies.insert(url.into(), reply);
        self
    }

    pub fn with_fallback(mut self, reply: StubReply) -> Self {
        self.fallback = Some(reply);
        self
    }

    /// URLs requested so far, in call order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.url.clone());

        let reply = self
            .replies
            .get(request.url.as_str())
            .or(self.fallback.as_ref())
            .ok_or_else(|| ApiError::Unreachable(format!("no stub registered for {}", request.url)))?;

        if let Some(message) = &reply.error {
            return Err(ApiError::Unreachable(message.clone()));
        }
        Ok(HttpResponse::new(reply.status, reply.body.clone()))
    }
}
