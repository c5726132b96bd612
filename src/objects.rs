//! Text objects in S3
//!
//! Each call resolves credentials from the shared [`Settings`], builds its own
//! client and issues exactly one request. Writes are last-writer-wins.

use serde::{Deserialize, Serialize};

use crate::error::{ObjectOperation, Result, ServiceError};
use crate::s3::{CredentialMode, S3Client};
use crate::settings::Settings;

/// Address of an object in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    pub bucket_name: String,
    pub file_name: String,
}

impl ObjectReference {
    pub fn new(bucket_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            file_name: file_name.into(),
        }
    }
}

impl std::fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket_name, self.file_name)
    }
}

async fn connect(
    settings: &Settings,
    role_is_attached: bool,
    operation: ObjectOperation,
) -> Result<S3Client> {
    let mode = CredentialMode::resolve(role_is_attached, settings).map_err(|e| {
        tracing::error!("{} {}", operation.message(), e);
        ServiceError::ConfigurationMissing {
            operation,
            variable: e.variable,
        }
    })?;

    S3Client::new(&mode, &settings.s3_client_config())
        .await
        .map_err(|source| failure(operation, source))
}

fn failure(operation: ObjectOperation, source: anyhow::Error) -> ServiceError {
    tracing::error!("{} {:#}", operation.message(), source);
    ServiceError::ObjectStoreFailure { operation, source }
}

/// Fetch an object and decode it as UTF-8 text
pub async fn read_object(
    settings: &Settings,
    role_is_attached: bool,
    object: &ObjectReference,
) -> Result<String> {
    let operation = ObjectOperation::Read;
    let client = connect(settings, role_is_attached, operation).await?;

    let data = client
        .get_object(&object.bucket_name, &object.file_name)
        .await
        .map_err(|source| failure(operation, source))?;

    let text = String::from_utf8(data.to_vec()).map_err(|e| {
        failure(
            operation,
            anyhow::Error::new(e).context(format!("{} is not valid UTF-8", object)),
        )
    })?;

    tracing::info!("File read successfully from S3: {}", object);
    Ok(text)
}

/// Store `content` as the full body of an object
pub async fn write_object(
    settings: &Settings,
    role_is_attached: bool,
    object: &ObjectReference,
    content: &str,
) -> Result<String> {
    let operation = ObjectOperation::Write;
    let client = connect(settings, role_is_attached, operation).await?;

    client
        .put_object(&object.bucket_name, &object.file_name, content.to_owned())
        .await
        .map_err(|source| failure(operation, source))?;

    tracing::info!("File uploaded successfully to S3: {}", object);
    Ok("File uploaded successfully to S3".to_string())
}
