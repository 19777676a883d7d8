//! API access layer for the Marvel comics catalog.
//!
//! # Overview
//! Signs requests, classifies transport failures, and flattens the
//! catalog's nested JSON envelope into a flat domain model (`Comic`,
//! `ComicList`, `ImagePath`, `CoverImage`).
//!
//! # Design
//! - `MarvelApi` is sans-IO: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. A mobile host can drive it directly.
//! - `MarvelClient` composes `MarvelApi` with a `Transport` and exposes one
//!   `async fn` per operation. No retry, cache or cancellation.
//! - `Transport` is the only network seam; `StubTransport` replaces it in
//!   tests.
//! - Every failure is one of the `ApiError` variants.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod format;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use api::MarvelApi;
pub use auth::{AuthParams, AuthSigner, Clock, Credentials, FixedClock, SystemClock};
pub use client::MarvelClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use format::oxford_comma_list;
pub use http::{HttpRequest, HttpResponse};
pub use transport::{StubReply, StubTransport, Transport, UreqTransport};
pub use types::{Comic, ComicList, CoverImage, ImagePath};
