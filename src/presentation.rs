// src/presentation.rs
//! Result view derived from the workflow state

use std::fmt;

use crate::types::OptimizationStatus;
use crate::workflow::{ResultTab, WorkflowState, OPTIMIZATION_THRESHOLD};

const NO_SUGGESTIONS: &str = "No specific keyword suggestions at this time or already well-matched!";
const NO_OPTIMIZED_RESUME: &str =
    "No optimized resume available yet. Click 'Optimize Resume' after analysis.";
const NO_DOWNLOAD: &str = "No optimized resume available for download yet.";

impl ResultTab {
    pub fn label(self) -> &'static str {
        match self {
            ResultTab::Overview => "Overview",
            ResultTab::Suggestions => "Suggestions",
            ResultTab::Optimized => "Optimized Resume",
            ResultTab::Download => "Download",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabDescriptor {
    pub tab: ResultTab,
    pub label: &'static str,
    pub active: bool,
}

/// Visible tabs, in display order. Optimized and Download only appear once
/// an optimization succeeded.
pub fn compute_tabs(state: &WorkflowState) -> Vec<TabDescriptor> {
    let optimized = state
        .optimization
        .as_ref()
        .is_some_and(|o| o.status == OptimizationStatus::Success);

    let mut tabs = vec![ResultTab::Overview, ResultTab::Suggestions];
    if optimized {
        tabs.extend([ResultTab::Optimized, ResultTab::Download]);
    }

    tabs.into_iter()
        .map(|tab| TabDescriptor {
            tab,
            label: tab.label(),
            active: tab == state.active_result_tab,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Low,
}

impl ScoreBand {
    pub fn for_percentage(match_percentage: f64) -> Self {
        if match_percentage >= 70.0 {
            ScoreBand::Strong
        } else if match_percentage >= OPTIMIZATION_THRESHOLD {
            ScoreBand::Moderate
        } else {
            ScoreBand::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabPanel<'a> {
    Overview {
        match_percentage: f64,
        band: ScoreBand,
        warnings: &'a [String],
    },
    Suggestions {
        chips: &'a [String],
    },
    Optimized {
        text: &'a str,
    },
    OptimizedPlaceholder {
        failure: Option<&'a str>,
    },
    Download {
        ready: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView<'a> {
    pub tabs: Vec<TabDescriptor>,
    pub panel: TabPanel<'a>,
}

/// `None` until an analysis exists.
pub fn render_results(state: &WorkflowState) -> Option<ResultView<'_>> {
    let analysis = state.analysis.as_ref()?;
    let optimization = state.optimization.as_ref();

    let panel = match state.active_result_tab {
        ResultTab::Overview => TabPanel::Overview {
            match_percentage: analysis.match_percentage,
            band: ScoreBand::for_percentage(analysis.match_percentage),
            warnings: &analysis.warnings,
        },
        ResultTab::Suggestions => TabPanel::Suggestions {
            chips: &analysis.suggestions,
        },
        ResultTab::Optimized => match optimization {
            Some(o) if o.is_success() => TabPanel::Optimized {
                text: o.optimized_resume_text.as_deref().unwrap_or_default(),
            },
            Some(o) if o.status == OptimizationStatus::Error => TabPanel::OptimizedPlaceholder {
                failure: Some(if o.message.is_empty() {
                    "Optimization failed."
                } else {
                    o.message.as_str()
                }),
            },
            _ => TabPanel::OptimizedPlaceholder { failure: None },
        },
        ResultTab::Download => TabPanel::Download {
            ready: optimization.is_some_and(|o| o.optimized_resume_text.is_some()),
        },
    };

    Some(ResultView {
        tabs: compute_tabs(state),
        panel,
    })
}

/// `72` -> "72%", `72.5` -> "72.5%"
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value)
}

impl fmt::Display for TabPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabPanel::Overview {
                match_percentage,
                band,
                warnings,
            } => {
                writeln!(
                    f,
                    "Overall match of original resume: {} ({:?})",
                    format_percentage(*match_percentage),
                    band
                )?;
                if !warnings.is_empty() {
                    writeln!(f, "Warnings & Suggestions")?;
                    for warning in warnings.iter() {
                        writeln!(f, "  > {}", warning)?;
                    }
                }
                Ok(())
            }
            TabPanel::Suggestions { chips } => {
                writeln!(f, "Keyword Suggestions")?;
                if chips.is_empty() {
                    writeln!(f, "{}", NO_SUGGESTIONS)
                } else {
                    let line = chips
                        .iter()
                        .map(|chip| format!("[{}]", chip))
                        .collect::<Vec<_>>()
                        .join(" ");
                    writeln!(f, "{}", line)
                }
            }
            TabPanel::Optimized { text } => {
                writeln!(f, "Optimized Resume Content")?;
                writeln!(f, "{}", text)
            }
            TabPanel::OptimizedPlaceholder { failure } => {
                writeln!(f, "{}", NO_OPTIMIZED_RESUME)?;
                if let Some(message) = failure {
                    writeln!(f, "x {}", message)?;
                }
                Ok(())
            }
            TabPanel::Download { ready: true } => {
                writeln!(f, "Your optimized resume is ready! Use the download action to save it.")
            }
            TabPanel::Download { ready: false } => writeln!(f, "{}", NO_DOWNLOAD),
        }
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self
            .tabs
            .iter()
            .map(|t| {
                if t.active {
                    format!("[*{}*]", t.label)
                } else {
                    format!("[{}]", t.label)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(f, "{}", header)?;
        write!(f, "{}", self.panel)
    }
}
