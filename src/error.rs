// src/error.rs
//! Error taxonomy shared by the HTTP client and the workflow controller

use thiserror::Error;

/// Failure of a single backend call, as seen by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend rejected the request with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// File picked for a slot with an extension outside the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unsupported file type: {file_name}. Please upload PDF, DOC, DOCX, or TXT files.")]
    UnsupportedType { file_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analysis,
    Optimization,
}

impl Operation {
    fn noun(self) -> &'static str {
        match self {
            Operation::Analysis => "analysis",
            Operation::Optimization => "optimization",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Operation::Analysis => "Analysis",
            Operation::Optimization => "Optimization",
        }
    }
}

/// User-visible error stored in the workflow state. `Display` is the exact
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Please upload both resume and job description files.")]
    MissingFiles,

    #[error("Please perform analysis first and ensure match is 40% or higher.")]
    AnalysisRequired,

    #[error("{}", rejection_message(.operation, .status, .detail))]
    Rejected {
        operation: Operation,
        status: u16,
        detail: Option<String>,
    },

    #[error("An unknown error occurred during {}.", .operation.noun())]
    Transport { operation: Operation },
}

fn rejection_message(operation: &Operation, status: &u16, detail: &Option<String>) -> String {
    match detail.as_deref() {
        Some(detail) if !detail.is_empty() => detail.to_string(),
        _ => format!("{} failed with status {}", operation.title(), status),
    }
}

impl WorkflowError {
    pub fn from_api(operation: Operation, err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, detail } => WorkflowError::Rejected {
                operation,
                status,
                detail,
            },
            ApiError::Transport(_) | ApiError::Decode(_) => WorkflowError::Transport { operation },
        }
    }
}
