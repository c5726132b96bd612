//! S3 File API Library
//!
//! A small HTTP service that reads and writes text files, either on the local
//! disk or in S3. The modules are public so the router and operations can be
//! exercised directly from tests.

pub mod api;
pub mod error;
pub mod files;
pub mod objects;
pub mod s3;
pub mod settings;

pub use error::{Result, ServiceError};
pub use settings::Settings;
