//! Authenticated URL construction.

use url::Url;

use crate::auth::AuthParams;
use crate::error::ApiError;
use crate::types::ImagePath;

/// Join `base_endpoint` and `resource` with exactly one `/`.
pub fn resource_path(base_endpoint: &str, resource: &str) -> String {
    format!(
        "{}/{}",
        base_endpoint.trim_end_matches('/'),
        resource.trim_start_matches('/')
    )
}

/// Append the `apikey`, `ts` and `hash` query parameters to `base_path`.
pub fn build_resource_url(base_path: &str, auth: &AuthParams) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_path).map_err(|e| ApiError::InvalidUrl(format!("{base_path}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{base_path}: not a hierarchical URL")));
    }
    url.query_pairs_mut().extend_pairs(auth.query_pairs());
    Ok(url)
}

/// Build `{path}/{size_variant}.{extension}` and force the `https` scheme.
///
/// The catalog hands out `http` thumbnail paths; whatever scheme the stored
/// path carries is replaced. A path without a `scheme://` authority cannot
/// become an `https` URL and is rejected.
pub fn build_image_url(image_path: &ImagePath, size_variant: &str) -> Result<Url, ApiError> {
    let path = image_path.path.as_str();
    let authority_and_path = match path.split_once("://") {
        Some((_, rest)) if !rest.is_empty() && !rest.starts_with('/') => rest,
        _ => return Err(ApiError::InvalidUrl(format!("{path}: no host to upgrade to https"))),
    };
    let raw = format!(
        "https://{}/{}.{}",
        authority_and_path, size_variant, image_path.file_extension
    );
    Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
}
