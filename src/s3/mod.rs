//! S3 access
//!
//! - [`credentials::CredentialMode`] - ambient vs. explicit credential selection
//! - [`client::S3Client`] - get/put wrapper around the AWS SDK client

pub mod client;
pub mod credentials;

pub use client::S3Client;
pub use credentials::{CredentialMode, Credentials, MissingCredential};
