//! Async client composing `MarvelApi` with a `Transport`.
//!
//! # Design
//! `MarvelClient` is an ordinary value holding its dependencies, so several
//! independently configured clients can coexist and tests can inject a
//! `StubTransport` and a fixed clock. Each operation is one round trip:
//! build, send, parse. The first error is returned as-is; nothing is
//! retried, cached or coalesced, and the only state shared between
//! concurrent calls is the transport.

use std::sync::Arc;

use crate::api::MarvelApi;
use crate::auth::Clock;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Comic, ComicList, CoverImage, ImagePath};

#[derive(Clone)]
pub struct MarvelClient {
    api: MarvelApi,
    transport: Arc<dyn Transport>,
}

impl MarvelClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self::from_api(MarvelApi::new(config), transport)
    }

    /// Client over the live `ureq` transport.
    pub fn with_default_transport(config: ClientConfig) -> Self {
        Self::new(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_clock(config: ClientConfig, transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        Self::from_api(MarvelApi::with_clock(config, clock), transport)
    }

    pub fn from_api(api: MarvelApi, transport: Arc<dyn Transport>) -> Self {
        Self { api, transport }
    }

    pub fn api(&self) -> &MarvelApi {
        &self.api
    }

    pub async fn fetch_comic(&self, id: i64) -> Result<Comic, ApiError> {
        tracing::debug!(comic_id = id, "fetching comic");
        let request = self.api.build_get_comic(id)?;
        let response = self.transport.send(request).await?;
        self.api.parse_get_comic(response)
    }

    pub async fn fetch_comics(&self) -> Result<ComicList, ApiError> {
        tracing::debug!("fetching comic list");
        let request = self.api.build_list_comics()?;
        let response = self.transport.send(request).await?;
        self.api.parse_list_comics(response)
    }

    /// Fetch the cover image at `image_path`.
    ///
    /// The "no artwork" placeholder is fetched like any other path; check
    /// `ImagePath::is_not_available` first to skip it.
    pub async fn fetch_image(&self, image_path: &ImagePath) -> Result<CoverImage, ApiError> {
        tracing::debug!(path = %image_path.path, "fetching cover image");
        let request = self.api.build_get_image(image_path)?;
        let response = self.transport.send(request).await?;
        self.api.parse_get_image(response)
    }
}

impl std::fmt::Debug for MarvelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarvelClient")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}
