// src/download.rs
//! Client-local emission of the optimized resume as a text file

use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

pub const TEXT_MIME_TYPE: &str = "text/plain";

/// Platform capability that hands a file to the user. Fire-and-forget:
/// implementations log their own failures.
pub trait Downloader: Send + Sync {
    fn emit(&self, filename: &str, mime_type: &str, content: &str);
}

/// `optimized_resume_<epoch-millis>.txt`
pub fn optimized_resume_filename() -> String {
    format!(
        "optimized_resume_{}.txt",
        chrono::Utc::now().timestamp_millis()
    )
}

pub fn emit_optimized_resume(downloader: &dyn Downloader, text: &str) {
    let filename = optimized_resume_filename();
    downloader.emit(&filename, TEXT_MIME_TYPE, text);
}

/// Saves artifacts into a directory on the local file system.
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Downloader for DirectoryDownloader {
    fn emit(&self, filename: &str, _mime_type: &str, content: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!("Failed to create download directory {}: {}", self.dir.display(), e);
            return;
        }

        let path = self.dir.join(filename);
        match std::fs::write(&path, content) {
            Ok(()) => info!("Saved download: {}", path.display()),
            Err(e) => warn!("Failed to save download {}: {}", path.display(), e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

/// Keeps every emitted artifact in memory.
#[derive(Default)]
pub struct RecordingDownloader {
    emitted: Mutex<Vec<EmittedFile>>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> Vec<EmittedFile> {
        self.emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Downloader for RecordingDownloader {
    fn emit(&self, filename: &str, mime_type: &str, content: &str) {
        self.emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(EmittedFile {
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
                content: content.to_string(),
            });
    }
}
