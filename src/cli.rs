// src/cli.rs
use crate::core::ServiceClient;
use crate::download::DirectoryDownloader;
use crate::environment::ClientEnvironment;
use crate::presentation::render_results;
use crate::selection::{FileSlot, SelectedFile};
use crate::workflow::{ResultTab, WorkflowController};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "aligncv")]
#[command(about = "Score a resume against a job description and optimize it")]
pub struct AlignCli {
    #[command(subcommand)]
    pub command: AlignCommand,

    /// Configuration file with `local` and `production` sections
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Backend base URL, overrides the configuration file
    #[arg(long, env = "ALIGNCV_API_BASE")]
    pub api_base: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Resume file (pdf, doc, docx, txt)
    #[arg(long)]
    pub resume: PathBuf,
    /// Job description file (pdf, doc, docx, txt)
    #[arg(long)]
    pub jd: PathBuf,
}

#[derive(Subcommand)]
pub enum AlignCommand {
    /// Analyze a resume against a job description
    Analyze {
        #[command(flatten)]
        documents: DocumentArgs,
    },
    /// Analyze, then optimize the resume when the match qualifies
    Optimize {
        #[command(flatten)]
        documents: DocumentArgs,
        /// Save the optimized resume as a text file
        #[arg(long)]
        download: bool,
        /// Directory for downloads, overrides the configuration file
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },
    /// Check that the backend answers
    Health,
}

/// Runs the command; `Ok(false)` when the workflow ended with a stored error.
pub async fn handle_command(cli: AlignCli) -> Result<bool> {
    let environment = ClientEnvironment::load(&cli.config, cli.api_base)?;
    info!("Backend: {}", environment.api_base);

    let client = ServiceClient::new(&environment.api_base, environment.timeout_seconds)?;

    match cli.command {
        AlignCommand::Health => {
            let welcome = client.welcome().await?;
            println!("✓ {}: {}", client.base_url(), welcome.message);
            Ok(true)
        }

        AlignCommand::Analyze { documents } => {
            let controller = WorkflowController::new(
                Arc::new(client),
                Arc::new(DirectoryDownloader::new(environment.download_dir)),
            );
            if !load_documents(&controller, &documents).await? {
                return Ok(false);
            }

            controller.analyze().await;
            if report_error(&controller) {
                return Ok(false);
            }

            print_tab(&controller, ResultTab::Overview);
            print_tab(&controller, ResultTab::Suggestions);
            if let Some(notice) = controller.snapshot().below_threshold_notice() {
                println!("{}", notice);
            }
            Ok(true)
        }

        AlignCommand::Optimize {
            documents,
            download,
            download_dir,
        } => {
            let download_dir = download_dir.unwrap_or(environment.download_dir);
            let controller = WorkflowController::new(
                Arc::new(client),
                Arc::new(DirectoryDownloader::new(download_dir.clone())),
            );
            if !load_documents(&controller, &documents).await? {
                return Ok(false);
            }

            controller.analyze().await;
            if report_error(&controller) {
                return Ok(false);
            }
            print_tab(&controller, ResultTab::Overview);

            let state = controller.snapshot();
            if !state.optimize_enabled() {
                if let Some(notice) = state.below_threshold_notice() {
                    println!("{}", notice);
                }
                return Ok(false);
            }

            controller.optimize().await;
            if report_error(&controller) {
                return Ok(false);
            }
            print_tab(&controller, ResultTab::Optimized);

            if download {
                controller.download_optimized();
                println!("📁 Download directory: {}", download_dir.display());
            }
            Ok(controller
                .snapshot()
                .optimization
                .is_some_and(|o| o.is_success()))
        }
    }
}

async fn load_documents(controller: &WorkflowController, documents: &DocumentArgs) -> Result<bool> {
    for (slot, path) in [
        (FileSlot::Resume, documents.resume.as_path()),
        (FileSlot::JobDescription, documents.jd.as_path()),
    ] {
        let file = SelectedFile::from_path(path).await?;
        if let Err(e) = controller.select_file(slot, file) {
            println!("❌ {}", e);
            return Ok(false);
        }
    }
    Ok(controller.snapshot().analyze_enabled())
}

fn report_error(controller: &WorkflowController) -> bool {
    match controller.snapshot().error_message() {
        Some(message) => {
            error!("Workflow error: {}", message);
            println!("❌ {}", message);
            true
        }
        None => false,
    }
}

fn print_tab(controller: &WorkflowController, tab: ResultTab) {
    controller.select_tab(tab);
    if let Some(view) = render_results(&controller.snapshot()) {
        println!("{}", view);
    }
}
