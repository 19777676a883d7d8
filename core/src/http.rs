//! HTTP request and response types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `MarvelApi` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network;
//! whoever executes the round trip (a `Transport`, or a mobile host across
//! the C ABI) only moves bytes. Status classification lives here so every
//! executor reports failures the same way.

use url::Url;

use crate::error::ApiError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Return the payload of a successful response.
    ///
    /// Anything other than 200 is `NonSuccessStatus`; a 200 with no bytes is
    /// `EmptyBody`.
    pub fn into_body(self) -> Result<Vec<u8>, ApiError> {
        if self.status != 200 {
            return Err(ApiError::NonSuccessStatus {
                status: self.status,
            });
        }
        if self.body.is_empty() {
            return Err(ApiError::EmptyBody);
        }
        Ok(self.body)
    }
}
