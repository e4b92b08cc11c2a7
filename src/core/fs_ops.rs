// src/core/fs_ops.rs
//! File system helpers with consistent error context

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Read a binary file such as an uploaded resume
    pub async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write file, creating parent directories as needed
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir_exists(parent).await?;
            }
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("result.json");

        FsOps::write_file_safe(&path, "{}").await.unwrap();
        assert_eq!(FsOps::read_file_safe(&path).await.unwrap(), "{}");
        assert_eq!(FsOps::read_bytes(&path).await.unwrap(), b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_missing_file_error_names_path() {
        let err = FsOps::read_bytes(Path::new("/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.pdf"));
    }
}
