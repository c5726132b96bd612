//! Credential selection for the S3 client
//!
//! Two modes are supported:
//! - Ambient: the SDK default chain (instance/task role, AWS_* variables, profiles)
//! - Explicit: a static key pair from [`Settings`], with an optional session token
//!
//! The ambient flag always wins: configured static credentials are ignored when
//! the caller says a role is attached.

use thiserror::Error;

use crate::settings::{self, Settings};

/// A mandatory static credential value is not configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Missing configuration value: {variable}")]
pub struct MissingCredential {
    pub variable: &'static str,
}

/// Static credential triple
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// How the S3 client authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialMode {
    /// Use whatever identity the process already has
    Ambient,
    /// Use the configured static credentials
    Explicit(Credentials),
}

impl CredentialMode {
    /// Pick the credential mode for one request.
    ///
    /// Fails with [`MissingCredential`] when explicit mode is requested and
    /// either mandatory value is absent.
    pub fn resolve(role_is_attached: bool, settings: &Settings) -> Result<Self, MissingCredential> {
        if role_is_attached {
            return Ok(CredentialMode::Ambient);
        }

        let access_key_id = settings.access_key_id.clone().ok_or(MissingCredential {
            variable: settings::ACCESS_KEY_ID,
        })?;
        let secret_access_key = settings.secret_access_key.clone().ok_or(MissingCredential {
            variable: settings::SECRET_ACCESS_KEY,
        })?;

        Ok(CredentialMode::Explicit(Credentials {
            access_key_id,
            secret_access_key,
            session_token: settings.session_token.clone(),
        }))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialMode::Ambient => "ambient",
            CredentialMode::Explicit(_) => "explicit",
        }
    }
}
