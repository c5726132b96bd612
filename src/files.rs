//! Text files on the local disk
//!
//! Paths come from the caller and are used as given: no normalisation and no
//! traversal checks.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Body of a file write request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileWriteRequest {
    pub path: String,
    pub file_name: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl FileWriteRequest {
    /// Target path, `path` and `file_name` joined with `/`
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.path, self.file_name)
    }
}

/// Create or truncate the target file and write the content verbatim.
///
/// A request without content is a write failure. A failure halfway through
/// can leave a partially written file behind.
pub async fn write_text_file(request: &FileWriteRequest) -> Result<String> {
    let full_path = request.full_path();

    let outcome = match &request.content {
        Some(content) => tokio::fs::write(&full_path, content.as_bytes())
            .await
            .map_err(anyhow::Error::from),
        None => Err(anyhow!("no content provided")),
    };

    match outcome {
        Ok(()) => {
            tracing::info!("The file was stored successfully to: {}", full_path);
            Ok(format!("The file was stored successfully :{}", full_path))
        }
        Err(source) => {
            tracing::error!(path = %full_path, "Cannot write to disk: {:#}", source);
            Err(ServiceError::WriteFailure {
                path: full_path,
                source,
            })
        }
    }
}

/// Read a whole file as UTF-8 text
pub async fn read_text_file(full_path: &str) -> Result<String> {
    let is_file = tokio::fs::metadata(full_path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        tracing::warn!("File does not exist: {}", full_path);
        return Err(ServiceError::NotFound {
            path: full_path.to_string(),
        });
    }

    tokio::fs::read_to_string(full_path).await.map_err(|e| {
        tracing::error!(path = %full_path, "Cannot read from disk: {}", e);
        ServiceError::ReadFailure {
            path: full_path.to_string(),
            source: e.into(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(dir: &TempDir, file_name: &str, content: Option<&str>) -> FileWriteRequest {
        FileWriteRequest {
            path: dir.path().to_string_lossy().into_owned(),
            file_name: file_name.to_string(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_full_path_joins_with_slash() {
        let req = FileWriteRequest {
            path: "/tmp/t".to_string(),
            file_name: "a.txt".to_string(),
            content: None,
        };
        assert_eq!(req.full_path(), "/tmp/t/a.txt");
    }

    #[test]
    fn test_request_content_defaults_to_none() {
        let req: FileWriteRequest =
            serde_json::from_str(r#"{"path": "/tmp", "file_name": "a.txt"}"#).unwrap();
        assert!(req.content.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "a.txt", Some("hello"));

        let message = write_text_file(&req).await.unwrap();
        assert!(message.contains(&req.full_path()));

        let content = read_text_file(&req.full_path()).await.unwrap();
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_write_preserves_unicode_and_newlines() {
        let dir = TempDir::new().unwrap();
        let text = "première ligne\nzweite Zeile 🚀\r\n\tend";
        let req = request(&dir, "unicode.txt", Some(text));

        write_text_file(&req).await.unwrap();
        assert_eq!(read_text_file(&req.full_path()).await.unwrap(), text);
    }

    #[tokio::test]
    async fn test_write_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        write_text_file(&request(&dir, "a.txt", Some("a much longer first version")))
            .await
            .unwrap();
        let req = request(&dir, "a.txt", Some("short"));
        write_text_file(&req).await.unwrap();

        assert_eq!(read_text_file(&req.full_path()).await.unwrap(), "short");
    }

    #[tokio::test]
    async fn test_write_empty_content() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "empty.txt", Some(""));
        write_text_file(&req).await.unwrap();
        assert_eq!(read_text_file(&req.full_path()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_write_without_content_fails() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "a.txt", None);

        let err = write_text_file(&req).await.unwrap_err();
        match err {
            ServiceError::WriteFailure { path, .. } => assert_eq!(path, req.full_path()),
            other => panic!("Expected WriteFailure, got {:?}", other),
        }
        assert!(!dir.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let req = FileWriteRequest {
            path: dir.path().join("no/such/dir").to_string_lossy().into_owned(),
            file_name: "a.txt".to_string(),
            content: Some("hello".to_string()),
        };

        let err = write_text_file(&req).await.unwrap_err();
        assert!(matches!(err, ServiceError::WriteFailure { .. }));
        assert!(err.to_string().contains(&req.full_path()));
    }

    #[tokio::test]
    async fn test_read_missing_file_echoes_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt").to_string_lossy().into_owned();

        let err = read_text_file(&path).await.unwrap_err();
        match &err {
            ServiceError::NotFound { path: p } => assert_eq!(p, &path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert!(err.to_string().contains(&path));
    }

    #[tokio::test]
    async fn test_read_deleted_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "gone.txt", Some("bye"));
        write_text_file(&req).await.unwrap();
        std::fs::remove_file(req.full_path()).unwrap();

        let err = read_text_file(&req.full_path()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_read_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().into_owned();

        let err = read_text_file(&path).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_read_invalid_utf8_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let err = read_text_file(&path.to_string_lossy()).await.unwrap_err();
        assert!(matches!(err, ServiceError::ReadFailure { .. }));
    }
}
