//! Stateless request builder and response parser for the comics API.
//!
//! # Design
//! `MarvelApi` holds configuration and a signer but no transport. Each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`, so any executor
//! (the async `MarvelClient`, or a mobile host across the C ABI) can sit in
//! between.

use std::sync::Arc;

use crate::auth::{AuthSigner, Clock};
use crate::config::ClientConfig;
use crate::decode::{decode_comic, decode_comic_list, decode_image};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::request::{build_image_url, build_resource_url, resource_path};
use crate::types::{Comic, ComicList, CoverImage, ImagePath};

#[derive(Debug, Clone)]
pub struct MarvelApi {
    config: ClientConfig,
    signer: AuthSigner,
}

impl MarvelApi {
    pub fn new(config: ClientConfig) -> Self {
        let signer = AuthSigner::new(config.credentials());
        Self { config, signer }
    }

    /// Sign requests with timestamps from `clock` instead of the wall clock.
    pub fn with_clock(config: ClientConfig, clock: Arc<dyn Clock>) -> Self {
        let signer = AuthSigner::with_clock(config.credentials(), clock);
        Self { config, signer }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn resource_request(&self, resource: &str) -> Result<HttpRequest, ApiError> {
        let path = resource_path(&self.config.base_endpoint, resource);
        let url = build_resource_url(&path, &self.signer.sign())?;
        Ok(HttpRequest::get(url).with_header("accept", "application/json"))
    }

    pub fn build_get_comic(&self, id: i64) -> Result<HttpRequest, ApiError> {
        self.resource_request(&format!("comics/{id}"))
    }

    pub fn build_list_comics(&self) -> Result<HttpRequest, ApiError> {
        self.resource_request("comics")
    }

    pub fn build_get_image(&self, image_path: &ImagePath) -> Result<HttpRequest, ApiError> {
        let url = build_image_url(image_path, &self.config.image_variant)?;
        Ok(HttpRequest::get(url).with_header("accept", "image/*"))
    }

    pub fn parse_get_comic(&self, response: HttpResponse) -> Result<Comic, ApiError> {
        decode_comic(&response.into_body()?)
    }

    pub fn parse_list_comics(&self, response: HttpResponse) -> Result<ComicList, ApiError> {
        decode_comic_list(&response.into_body()?)
    }

    pub fn parse_get_image(&self, response: HttpResponse) -> Result<CoverImage, ApiError> {
        decode_image(response.into_body()?)
    }
}
