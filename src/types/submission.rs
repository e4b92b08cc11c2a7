// src/types/submission.rs
use anyhow::Result;
use std::path::Path;

use crate::core::FsOps;
use crate::utils::{content_type_for, validate_file_extension, ACCEPTED_EXTENSIONS};

/// A resume file held by the upload form
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// The (file, job description) pair sent in one request
#[derive(Debug, Clone)]
pub struct Submission {
    pub file: SelectedFile,
    pub job_description: String,
}

impl SelectedFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            content_type: content_type_for(&name),
            name,
            bytes,
        }
    }

    /// Load any file from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
            .to_string();

        let bytes = FsOps::read_bytes(path).await?;
        Ok(Self::from_bytes(name, bytes))
    }

    /// Load a file the way the resume picker does: PDF, DOC or DOCX only
    pub async fn pick(path: &Path) -> Result<Self> {
        validate_file_extension(&path.to_string_lossy(), ACCEPTED_EXTENSIONS)?;
        Self::load(path).await
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
