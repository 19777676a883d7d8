//! Decoding of the catalog's JSON envelope into the flat domain model.
//!
//! # Design
//! The wire shape `{ data: { results: [ .. ] } }` is modelled by private,
//! parse-only structs. `flatten` is the single place where a raw record
//! becomes a `Comic`; both the single and the list decoders go through it.

use std::io::Cursor;

use image::ImageReader;
use serde::Deserialize;

use crate::error::ApiError;
use crate::types::{Comic, ComicList, CoverImage, ImagePath};

/// Collected-edition marker the catalog appends to trade paperback titles.
const TRADE_PAPERBACK_SUFFIX: &str = " TPB";

#[derive(Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Deserialize)]
struct EnvelopeData {
    results: Vec<RawComic>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComic {
    id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    issue_number: i64,
    thumbnail: RawThumbnail,
    #[serde(default)]
    creators: RawCreators,
}

#[derive(Deserialize)]
struct RawThumbnail {
    path: String,
    extension: String,
}

#[derive(Deserialize, Default)]
struct RawCreators {
    #[serde(default)]
    items: Vec<RawCreator>,
}

#[derive(Deserialize)]
struct RawCreator {
    name: String,
}

/// Strip the year/variant annotation and the trade paperback marker.
///
/// Everything from the first `(` on is dropped, the rest is trimmed, and a
/// trailing ` TPB` is removed. Applying it twice gives the same result.
pub fn normalize_title(raw: &str) -> String {
    let mut title = raw.split('(').next().unwrap_or_default().trim();
    while let Some(stripped) = title.strip_suffix(TRADE_PAPERBACK_SUFFIX) {
        title = stripped.trim_end();
    }
    title.to_string()
}

fn flatten(raw: RawComic) -> Comic {
    Comic {
        id: raw.id,
        title: normalize_title(&raw.title),
        description: raw.description,
        authors: raw.creators.items.into_iter().map(|c| c.name).collect(),
        issue_number: raw.issue_number,
        image_path: ImagePath {
            path: raw.thumbnail.path,
            file_extension: raw.thumbnail.extension,
        },
    }
}

fn parse_envelope(bytes: &[u8]) -> Result<Envelope, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Decode a single-comic response. An empty `results` array is `Empty`.
pub fn decode_comic(bytes: &[u8]) -> Result<Comic, ApiError> {
    let envelope = parse_envelope(bytes)?;
    envelope
        .data
        .results
        .into_iter()
        .next()
        .map(flatten)
        .ok_or(ApiError::Empty)
}

/// Decode a list response. An empty `results` array is an empty list.
pub fn decode_comic_list(bytes: &[u8]) -> Result<ComicList, ApiError> {
    let envelope = parse_envelope(bytes)?;
    Ok(ComicList::new(
        envelope.data.results.into_iter().map(flatten).collect(),
    ))
}

/// Accept `bytes` only if they decode as a complete image.
///
/// The signature names the format; the full decode rejects truncated or
/// corrupt payloads that merely start with valid magic bytes.
pub fn decode_image(bytes: Vec<u8>) -> Result<CoverImage, ApiError> {
    let kind = infer::get(&bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .ok_or(ApiError::UndecodableImage)?;
    let decoded = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|_| ApiError::UndecodableImage)?
        .decode()
        .map_err(|e| {
            tracing::debug!(error = %e, "cover image failed to decode");
            ApiError::UndecodableImage
        })?;
    Ok(CoverImage {
        mime_type: kind.mime_type(),
        extension: kind.extension(),
        width: decoded.width(),
        height: decoded.height(),
        bytes,
    })
}
