//! Client configuration.

use std::fmt;

use serde::Deserialize;

use crate::auth::Credentials;
use crate::error::ConfigError;

pub const DEFAULT_BASE_ENDPOINT: &str = "https://gateway.marvel.com:443/v1/public/";
pub const DEFAULT_IMAGE_VARIANT: &str = "detail";

const PUBLIC_KEY_VAR: &str = "MARVEL_PUBLIC_KEY";
const PRIVATE_KEY_VAR: &str = "MARVEL_PRIVATE_KEY";
const BASE_ENDPOINT_VAR: &str = "MARVEL_BASE_ENDPOINT";
const IMAGE_VARIANT_VAR: &str = "MARVEL_IMAGE_VARIANT";

/// Keys and endpoints for one client instance.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub public_key: String,
    pub private_key: String,
    #[serde(default = "default_base_endpoint")]
    pub base_endpoint: String,
    /// Size variant segment of cover image URLs, e.g. `detail` or
    /// `portrait_xlarge`.
    #[serde(default = "default_image_variant")]
    pub image_variant: String,
}

fn default_base_endpoint() -> String {
    DEFAULT_BASE_ENDPOINT.to_string()
}

fn default_image_variant() -> String {
    DEFAULT_IMAGE_VARIANT.to_string()
}

impl ClientConfig {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_endpoint: default_base_endpoint(),
            image_variant: default_image_variant(),
        }
    }

    pub fn with_base_endpoint(mut self, base_endpoint: impl Into<String>) -> Self {
        self.base_endpoint = base_endpoint.into();
        self
    }

    pub fn with_image_variant(mut self, image_variant: impl Into<String>) -> Self {
        self.image_variant = image_variant.into();
        self
    }

    /// Read `MARVEL_PUBLIC_KEY` and `MARVEL_PRIVATE_KEY`, plus the optional
    /// `MARVEL_BASE_ENDPOINT` and `MARVEL_IMAGE_VARIANT` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Empty values count as unset.
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &'static str| non_empty(name).ok_or(ConfigError::MissingVar(name));

        let mut config = Self::new(required(PUBLIC_KEY_VAR)?, required(PRIVATE_KEY_VAR)?);
        if let Some(endpoint) = non_empty(BASE_ENDPOINT_VAR) {
            config.base_endpoint = endpoint;
        }
        if let Some(variant) = non_empty(IMAGE_VARIANT_VAR) {
            config.image_variant = variant;
        }
        Ok(config)
    }

    /// Parse a JSON object with the same field names as this struct.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.public_key.clone(), self.private_key.clone())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("base_endpoint", &self.base_endpoint)
            .field("image_variant", &self.image_variant)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn new_uses_defaults() {
        let config = ClientConfig::new("pub", "priv");
        assert_eq!(config.base_endpoint, DEFAULT_BASE_ENDPOINT);
        assert_eq!(config.image_variant, "detail");
    }

    #[test]
    fn lookup_reads_required_and_optional_vars() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MARVEL_PUBLIC_KEY", "pub"),
            ("MARVEL_PRIVATE_KEY", "priv"),
            ("MARVEL_IMAGE_VARIANT", "portrait_xlarge"),
        ]))
        .unwrap();
        assert_eq!(config.public_key, "pub");
        assert_eq!(config.private_key, "priv");
        assert_eq!(config.base_endpoint, DEFAULT_BASE_ENDPOINT);
        assert_eq!(config.image_variant, "portrait_xlarge");
    }

    #[test]
    fn lookup_missing_private_key_fails() {
        let err = ClientConfig::from_lookup(lookup(&[("MARVEL_PUBLIC_KEY", "pub")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("MARVEL_PRIVATE_KEY"));
    }

    #[test]
    fn lookup_empty_key_counts_as_missing() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("MARVEL_PUBLIC_KEY", ""),
            ("MARVEL_PRIVATE_KEY", "priv"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("MARVEL_PUBLIC_KEY"));
    }

    #[test]
    fn lookup_empty_optional_vars_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MARVEL_PUBLIC_KEY", "pub"),
            ("MARVEL_PRIVATE_KEY", "priv"),
            ("MARVEL_BASE_ENDPOINT", ""),
            ("MARVEL_IMAGE_VARIANT", ""),
        ]))
        .unwrap();
        assert_eq!(config.base_endpoint, DEFAULT_BASE_ENDPOINT);
        assert_eq!(config.image_variant, DEFAULT_IMAGE_VARIANT);
    }

    #[test]
    fn lookup_reads_base_endpoint_override() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MARVEL_PUBLIC_KEY", "pub"),
            ("MARVEL_PRIVATE_KEY", "priv"),
            ("MARVEL_BASE_ENDPOINT", "http://127.0.0.1:3000/v1/public/"),
        ]))
        .unwrap();
        assert_eq!(config.base_endpoint, "http://127.0.0.1:3000/v1/public/");
    }

    #[test]
    fn json_fills_defaults() {
        let config = ClientConfig::from_json(r#"{"public_key":"pub","private_key":"priv"}"#).unwrap();
        assert_eq!(config, ClientConfig::new("pub", "priv"));
    }

    #[test]
    fn json_without_keys_is_invalid() {
        let err = ClientConfig::from_json(r#"{"base_endpoint":"http://localhost"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn debug_redacts_private_key() {
        let rendered = format!("{:?}", ClientConfig::new("pub", "s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
