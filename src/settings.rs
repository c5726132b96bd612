//! Service settings
//!
//! Settings are read once at startup from environment variables and shared
//! with every request handler. Nothing re-reads the environment afterwards.
//!
//! - `BIND_ADDR`: listen address, defaults to `127.0.0.1:8000`
//! - `S3_ACCESS_KEY_ID` / `S3_SECRET_ACCESS_KEY`: static credentials
//! - `S3_SESSION_TOKEN`: needed for temporary credential sets
//! - `S3_REGION`, `S3_ENDPOINT_URL`, `S3_FORCE_PATH_STYLE`: client tuning
//!
//! The credential variables also accept the older `AWS_TEK_UP_*` names when
//! the `S3_*` one is unset.

use anyhow::{Context, Result};
use std::net::SocketAddr;

pub const BIND_ADDR: &str = "BIND_ADDR";
pub const ACCESS_KEY_ID: &str = "S3_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY: &str = "S3_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN: &str = "S3_SESSION_TOKEN";
pub const LEGACY_ACCESS_KEY_ID: &str = "AWS_TEK_UP_ACCESS_KEY_ID";
pub const LEGACY_SECRET_ACCESS_KEY: &str = "AWS_TEK_UP_SECRET_ACCESS_KEY";
pub const LEGACY_SESSION_TOKEN: &str = "AWS_TEK_UP_SESSION_TOKEN";
pub const REGION: &str = "S3_REGION";
pub const ENDPOINT_URL: &str = "S3_ENDPOINT_URL";
pub const FORCE_PATH_STYLE: &str = "S3_FORCE_PATH_STYLE";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Process-wide configuration, immutable once loaded
#[derive(Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// Connection options for the S3 client, independent of the credential mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3ClientConfig {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = get(BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{} must be a socket address like 0.0.0.0:8000", BIND_ADDR))?;

        let force_path_style = match get(FORCE_PATH_STYLE) {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("{} must be a boolean, got {:?}", FORCE_PATH_STYLE, value))?,
            None => false,
        };

        let settings = Self {
            bind_addr,
            access_key_id: get(ACCESS_KEY_ID).or_else(|| get(LEGACY_ACCESS_KEY_ID)),
            secret_access_key: get(SECRET_ACCESS_KEY).or_else(|| get(LEGACY_SECRET_ACCESS_KEY)),
            session_token: get(SESSION_TOKEN).or_else(|| get(LEGACY_SESSION_TOKEN)),
            region: get(REGION),
            endpoint_url: get(ENDPOINT_URL),
            force_path_style,
        };

        tracing::info!(
            "Loaded settings: bind_addr={}, region={:?}, endpoint={:?}, static_credentials={}",
            bind_addr,
            settings.region,
            settings.endpoint_url,
            settings.has_static_credentials()
        );

        Ok(settings)
    }

    /// Whether both mandatory static credential values are present
    pub fn has_static_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }

    pub fn s3_client_config(&self) -> S3ClientConfig {
        S3ClientConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: self.force_path_style,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            region: None,
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

// Keep secrets out of logs
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

/// Lenient boolean parsing: `true/t/yes/y/on/1` and `false/f/no/n/off/0`, any case
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
