//! AWS S3 client wrapper

use anyhow::{Context, Result};
use aws_sdk_s3::config::{BehaviorVersion, Credentials as SdkCredentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::s3::credentials::CredentialMode;
use crate::settings::S3ClientConfig;

/// Provider name reported by the SDK for static credentials
const STATIC_PROVIDER_NAME: &str = "s3-file-api-static";

/// S3 client bound to one credential mode
pub struct S3Client {
    client: Client,
    mode: &'static str,
}

impl S3Client {
    /// Build a client for the given credential mode.
    ///
    /// No request is sent here. Ambient mode defers to the SDK default
    /// provider chain, which is only consulted on the first call.
    pub async fn new(mode: &CredentialMode, config: &S3ClientConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let CredentialMode::Explicit(creds) = mode {
            loader = loader.credentials_provider(SdkCredentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                creds.session_token.clone(),
                None,
                STATIC_PROVIDER_NAME,
            ));
        }

        let sdk_config = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::debug!(
            "Created S3 client: mode={}, region={:?}, endpoint={:?}",
            mode.as_str(),
            sdk_config.region().map(|r| r.to_string()),
            config.endpoint_url
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
            mode: mode.as_str(),
        })
    }

    /// Download an object, fully buffered
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("GetObject failed for s3://{}/{}", bucket, key))?;

        let data = response
            .body
            .collect()
            .await
            .with_context(|| format!("Failed to read body of s3://{}/{}", bucket, key))?;
        Ok(data.into_bytes())
    }

    /// Upload bytes as an object, replacing any existing one
    pub async fn put_object(&self, bucket: &str, key: &str, data: impl Into<Bytes>) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data.into()))
            .send()
            .await
            .with_context(|| format!("PutObject failed for s3://{}/{}", bucket, key))?;

        Ok(())
    }

    /// Credential mode this client was built with
    pub fn mode(&self) -> &str {
        self.mode
    }
}
