//! Domain model for the comics catalog.
//!
//! # Design
//! These are the flat types handed to callers. The provider's nested wire
//! shape lives privately in `decode` and is flattened into these once, so
//! nothing past the decoder ever sees `data.results[..]`.

use serde::{Deserialize, Serialize};

use crate::format::oxford_comma_list;

/// A single comic issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comic {
    pub id: i64,
    /// Title with the year/variant annotation and any ` TPB` marker removed.
    pub title: String,
    pub description: Option<String>,
    /// Creator names in provider order.
    pub authors: Vec<String>,
    pub issue_number: i64,
    pub image_path: ImagePath,
}

impl Comic {
    /// Authors joined as an Oxford-comma list, e.g. `"a, b, and c"`.
    pub fn authors_display(&self) -> String {
        oxford_comma_list(&self.authors)
    }
}

/// Comics in the order the provider returned them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComicList {
    comics: Vec<Comic>,
}

impl ComicList {
    pub fn new(comics: Vec<Comic>) -> Self {
        Self { comics }
    }

    pub fn len(&self) -> usize {
        self.comics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comics.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comic> {
        self.comics.iter()
    }

    pub fn as_slice(&self) -> &[Comic] {
        &self.comics
    }

    pub fn into_vec(self) -> Vec<Comic> {
        self.comics
    }
}

impl IntoIterator for ComicList {
    type Item = Comic;
    type IntoIter = std::vec::IntoIter<Comic>;

    fn into_iter(self) -> Self::IntoIter {
        self.comics.into_iter()
    }
}

impl<'a> IntoIterator for &'a ComicList {
    type Item = &'a Comic;
    type IntoIter = std::slice::Iter<'a, Comic>;

    fn into_iter(self) -> Self::IntoIter {
        self.comics.iter()
    }
}

/// Location of a cover image: a base path plus a file extension without the
/// leading dot. The full URL is assembled by `request::build_image_url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ImagePath {
    pub path: String,
    pub file_extension: String,
}

impl ImagePath {
    /// Final path segment the provider uses when no artwork exists.
    pub const NOT_AVAILABLE: &'static str = "image_not_available";

    pub fn new(path: impl Into<String>, file_extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_extension: file_extension.into(),
        }
    }

    /// True when the path points at the provider's "no artwork" placeholder.
    /// Callers should skip `fetch_image` in that case.
    pub fn is_not_available(&self) -> bool {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .is_some_and(|segment| segment == Self::NOT_AVAILABLE)
    }
}

/// Raw cover image bytes that decoded as a complete image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub extension: &'static str,
    pub width: u32,
    pub height: u32,
}
