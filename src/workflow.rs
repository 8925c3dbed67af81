// src/workflow.rs
//! Upload workflow controller: owns the workflow state and runs the
//! analyze -> optimize request sequence against the backend.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

use crate::core::ResumeApi;
use crate::download::{emit_optimized_resume, Downloader};
use crate::error::{Operation, SelectionError, WorkflowError};
use crate::selection::{FileSlot, SelectedFile, SelectedFiles};
use crate::types::{AnalysisResult, OptimizationResult};

/// Minimum match percentage (0-100) required before optimizing.
pub const OPTIMIZATION_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultTab {
    #[default]
    Overview,
    Suggestions,
    Optimized,
    Download,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub analyzing: bool,
    pub optimizing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub files: SelectedFiles,
    pub analysis: Option<AnalysisResult>,
    pub optimization: Option<OptimizationResult>,
    pub loading: LoadingState,
    pub error: Option<WorkflowError>,
    pub active_result_tab: ResultTab,
    generation: u64,
}

impl WorkflowState {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn analyze_enabled(&self) -> bool {
        self.files.is_complete() && !self.loading.analyzing && !self.loading.optimizing
    }

    pub fn optimize_enabled(&self) -> bool {
        self.analysis
            .as_ref()
            .is_some_and(|a| a.match_percentage >= OPTIMIZATION_THRESHOLD)
            && !self.loading.optimizing
    }

    pub fn below_threshold_notice(&self) -> Option<&'static str> {
        match &self.analysis {
            Some(a) if a.match_percentage < OPTIMIZATION_THRESHOLD => Some(
                "Match score is below 40%. Optimization is disabled. Please adjust your resume first.",
            ),
            _ => None,
        }
    }

    pub fn analyze_label(&self) -> &'static str {
        if self.loading.analyzing {
            "Analyzing..."
        } else {
            "Analyze Resume"
        }
    }

    pub fn optimize_label(&self) -> &'static str {
        if self.loading.optimizing {
            "Optimizing..."
        } else {
            "Optimize Resume"
        }
    }

    fn reset_results(&mut self) {
        self.generation += 1;
        self.analysis = None;
        self.optimization = None;
        self.error = None;
        self.active_result_tab = ResultTab::Overview;
    }
}

/// Cloneable handle over the single workflow state. The lock is never held
/// across a backend call.
#[derive(Clone)]
pub struct WorkflowController {
    state: Arc<Mutex<WorkflowState>>,
    api: Arc<dyn ResumeApi>,
    downloader: Arc<dyn Downloader>,
}

impl WorkflowController {
    pub fn new(api: Arc<dyn ResumeApi>, downloader: Arc<dyn Downloader>) -> Self {
        Self {
            state: Arc::new(Mutex::new(WorkflowState::default())),
            api,
            downloader,
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Consistent copy of the current state for rendering.
    pub fn snapshot(&self) -> WorkflowState {
        self.lock().clone()
    }

    pub fn select_file(&self, slot: FileSlot, file: SelectedFile) -> Result<(), SelectionError> {
        let mut state = self.lock();
        let (changed, result) = state.files.select(slot, file);
        if changed {
            state.reset_results();
        }
        if let Err(e) = &result {
            warn!("{}", e);
        }
        result
    }

    pub fn clear_file(&self, slot: FileSlot) {
        let mut state = self.lock();
        if state.files.clear(slot) {
            state.reset_results();
        }
    }

    pub fn select_tab(&self, tab: ResultTab) {
        self.lock().active_result_tab = tab;
    }

    pub async fn analyze(&self) {
        let (files, generation) = {
            let mut state = self.lock();
            let Some(files) = state.files.pair() else {
                state.error = Some(WorkflowError::MissingFiles);
                return;
            };

            // A new analysis supersedes any optimize still in flight.
            state.reset_results();
            state.loading.analyzing = true;
            (files, state.generation)
        };

        info!(
            "Analyzing {} against {}",
            files.resume.file_name, files.job_description.file_name
        );
        let outcome = self.api.analyze(&files).await;

        let mut state = self.lock();
        state.loading.analyzing = false;
        if state.generation != generation {
            warn!("Discarding superseded analysis response");
            return;
        }

        match outcome {
            Ok(analysis) => {
                info!("Analysis complete: {}% match", analysis.match_percentage);
                state.analysis = Some(analysis);
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                state.error = Some(WorkflowError::from_api(Operation::Analysis, e));
                state.analysis = None;
            }
        }
    }

    pub async fn optimize(&self) {
        let (files, generation) = {
            let mut state = self.lock();
            let Some(files) = state.files.pair() else {
                state.error = Some(WorkflowError::MissingFiles);
                return;
            };
            let qualifies = state
                .analysis
                .as_ref()
                .is_some_and(|a| a.match_percentage >= OPTIMIZATION_THRESHOLD);
            if !qualifies {
                state.error = Some(WorkflowError::AnalysisRequired);
                return;
            }

            state.loading.optimizing = true;
            state.error = None;
            state.optimization = None;
            (files, state.generation)
        };

        info!("Optimizing {}", files.resume.file_name);
        let outcome = self.api.optimize(&files).await;

        let mut state = self.lock();
        state.loading.optimizing = false;
        if state.generation != generation {
            warn!("Discarding superseded optimization response");
            return;
        }

        match outcome {
            Ok(optimization) => {
                info!("Optimization finished: {:?}", optimization.status);
                state.optimization = Some(optimization);
                state.active_result_tab = ResultTab::Optimized;
            }
            Err(e) => {
                warn!("Optimization failed: {}", e);
                state.error = Some(WorkflowError::from_api(Operation::Optimization, e));
            }
        }
    }

    /// Emit the optimized resume, if there is one.
    pub fn download_optimized(&self) {
        let text = self
            .lock()
            .optimization
            .as_ref()
            .and_then(|o| o.optimized_resume_text.clone());

        if let Some(text) = text {
            emit_optimized_resume(self.downloader.as_ref(), &text);
        }
    }
}
