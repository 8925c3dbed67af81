pub mod response;

pub use response::{
    AnalysisResult, ErrorDetail, ExtractedText, OptimizationResult, OptimizationStatus,
    WelcomeResponse,
};
