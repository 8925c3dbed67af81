// src/selection.rs
//! Resume / job-description file selection and extension validation

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::error::SelectionError;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSlot {
    Resume,
    JobDescription,
}

/// A user-provided document: its original name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub content: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: Arc::from(content.into()),
        }
    }

    /// Read a file from disk, keeping only its final path component as name.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?
            .to_string();

        Ok(Self::new(file_name, content))
    }

    pub fn extension(&self) -> Option<String> {
        file_extension(&self.file_name)
    }

    /// MIME type sent with the multipart part.
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref().unwrap_or_default() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFiles {
    pub resume: Option<SelectedFile>,
    pub job_description: Option<SelectedFile>,
}

impl SelectedFiles {
    pub fn slot(&self, slot: FileSlot) -> Option<&SelectedFile> {
        match slot {
            FileSlot::Resume => self.resume.as_ref(),
            FileSlot::JobDescription => self.job_description.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: FileSlot) -> &mut Option<SelectedFile> {
        match slot {
            FileSlot::Resume => &mut self.resume,
            FileSlot::JobDescription => &mut self.job_description,
        }
    }

    /// Both documents, when both are present.
    pub fn pair(&self) -> Option<UploadPair> {
        match (&self.resume, &self.job_description) {
            (Some(resume), Some(job_description)) => Some(UploadPair {
                resume: resume.clone(),
                job_description: job_description.clone(),
            }),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.resume.is_some() && self.job_description.is_some()
    }

    /// Store `file` in `slot` if its extension is accepted, otherwise empty the
    /// slot. Returns whether the pair changed along with the validation result.
    pub fn select(&mut self, slot: FileSlot, file: SelectedFile) -> (bool, Result<(), SelectionError>) {
        let current = self.slot_mut(slot);
        match validate_file_extension(&file.file_name) {
            Ok(()) => {
                *current = Some(file);
                (true, Ok(()))
            }
            Err(e) => {
                let changed = current.take().is_some();
                (changed, Err(e))
            }
        }
    }

    /// Empty `slot`. Returns whether anything was removed.
    pub fn clear(&mut self, slot: FileSlot) -> bool {
        self.slot_mut(slot).take().is_some()
    }
}

/// The two documents of one request.
#[derive(Debug, Clone)]
pub struct UploadPair {
    pub resume: SelectedFile,
    pub job_description: SelectedFile,
}

/// Lowercased text after the last `.`, if the name has one.
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn validate_file_extension(file_name: &str) -> Result<(), SelectionError> {
    let accepted = file_extension(file_name)
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()));
    if accepted {
        Ok(())
    } else {
        Err(SelectionError::UnsupportedType {
            file_name: file_name.to_string(),
        })
    }
}
