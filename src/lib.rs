//! Client for the AlignCV resume optimizer: file selection, the
//! analyze/optimize workflow against the backend, the tabbed result view
//! and the optimized-resume download.

pub mod cli;
pub mod core;
pub mod download;
pub mod environment;
pub mod error;
pub mod presentation;
pub mod selection;
pub mod types;
pub mod workflow;

pub use crate::core::{ResumeApi, ServiceClient};
pub use download::{DirectoryDownloader, Downloader, RecordingDownloader};
pub use environment::ClientEnvironment;
pub use error::{ApiError, SelectionError, WorkflowError};
pub use presentation::{compute_tabs, render_results, ResultView, TabDescriptor, TabPanel};
pub use selection::{FileSlot, SelectedFile, SelectedFiles};
pub use workflow::{ResultTab, WorkflowController, WorkflowState};
