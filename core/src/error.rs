//! Error types for the Marvel API client.
//!
//! # Design
//! `ApiError` is a closed taxonomy: one variant per distinguishable failure
//! cause, so a caller can always tell *where* a round trip broke (building
//! the URL, reaching the server, the status line, the payload, or the image
//! bytes). The core never recovers from any of them.

use thiserror::Error;

/// Errors returned by `MarvelApi` and `MarvelClient` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request URL could not be constructed from the inputs.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No response was obtained (DNS, connection, TLS, I/O).
    #[error("unable to complete request: {0}")]
    Unreachable(String),

    /// The server answered with a status other than 200.
    #[error("unexpected HTTP status {status}")]
    NonSuccessStatus { status: u16 },

    /// The server answered 200 with no payload.
    #[error("response body was empty")]
    EmptyBody,

    /// The payload did not match the expected envelope schema.
    #[error("response could not be decoded: {0}")]
    Malformed(String),

    /// The envelope decoded but contained no results.
    #[error("response contained no results")]
    Empty,

    /// The payload is not a recognizable image.
    #[error("image data could not be decoded")]
    UndecodableImage,
}

/// Errors raised while loading a `ClientConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
