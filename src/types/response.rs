use serde::{Deserialize, Serialize};

// ===== Backend Response Types =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedText {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: String,
}

/// Body of a successful `/analyze/` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub message: String,
    pub match_percentage: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(rename = "extracted_text_debug", default)]
    pub extracted_text: ExtractedText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationStatus {
    Success,
    Error,
}

/// Body of a successful `/optimize/` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    #[serde(rename = "optimization_status")]
    pub status: OptimizationStatus,
    #[serde(default)]
    pub message: String,
    pub optimized_resume_text: Option<String>,
    pub download_link: Option<String>,
    pub original_match_percentage: Option<f64>,
}

impl OptimizationResult {
    pub fn is_success(&self) -> bool {
        self.status == OptimizationStatus::Success
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorDetail {
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
