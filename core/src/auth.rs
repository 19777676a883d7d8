//! Request signing for the Marvel public API.
//!
//! # Design
//! Every call carries `apikey`, `ts` and `hash` query parameters where
//! `hash = md5(ts + private_key + public_key)` as lowercase hex. The gateway
//! recomputes the hash from the `ts` it receives, so the same `ts` value must
//! feed both the digest and the query string. `AuthSigner` reads the clock
//! once per `sign` call and threads that single value through both.

use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use md5::{Digest, Md5};

/// The three authentication query parameters for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub apikey: String,
    pub ts: String,
    pub hash: String,
}

impl AuthParams {
    pub fn sign(public_key: &str, private_key: &str, ts: &str) -> Self {
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(private_key.as_bytes());
        hasher.update(public_key.as_bytes());
        Self {
            apikey: public_key.to_string(),
            ts: ts.to_string(),
            hash: hex::encode(hasher.finalize()),
        }
    }

    /// Query pairs in the order the gateway documents them.
    pub fn query_pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("apikey", self.apikey.as_str()),
            ("ts", self.ts.as_str()),
            ("hash", self.hash.as_str()),
        ]
    }
}

/// Source of the `ts` value.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> String;
}

/// Wall-clock seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            .to_string()
    }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(ts: impl Into<String>) -> Self {
        Self(ts.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}

/// Public/private key pair issued by the developer portal.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Produces fresh `AuthParams` for each request.
#[derive(Clone)]
pub struct AuthSigner {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl AuthSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, clock }
    }

    pub fn sign(&self) -> AuthParams {
        let ts = self.clock.timestamp();
        AuthParams::sign(&self.credentials.public_key, &self.credentials.private_key, &ts)
    }
}

impl fmt::Debug for AuthSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSigner")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
