//! End-to-end workflow tests against a mocked backend

use std::sync::Arc;

use aligncv::download::RecordingDownloader;
use aligncv::{
    render_results, FileSlot, ResultTab, SelectedFile, ServiceClient, TabPanel, WorkflowController,
};
use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn controller_for(base_url: &str) -> (WorkflowController, Arc<RecordingDownloader>) {
    let client = ServiceClient::new(base_url, 5).expect("Failed to create client");
    let downloader = Arc::new(RecordingDownloader::new());
    (
        WorkflowController::new(Arc::new(client), downloader.clone()),
        downloader,
    )
}

fn select_documents(controller: &WorkflowController) {
    controller
        .select_file(FileSlot::Resume, SelectedFile::new("resume.pdf", b"%PDF-1.4 resume".to_vec()))
        .expect("resume.pdf should be accepted");
    controller
        .select_file(FileSlot::JobDescription, SelectedFile::new("jd.txt", b"Platform engineer".to_vec()))
        .expect("jd.txt should be accepted");
}

fn analysis_body(match_percentage: f64) -> serde_json::Value {
    json!({
        "message": "Files analyzed successfully!",
        "match_percentage": match_percentage,
        "warnings": ["Missing metrics"],
        "suggestions": ["Add 'Kubernetes'"],
        "extracted_text_debug": {"resume_text": "resume", "jd_text": "Platform engineer"}
    })
}

#[tokio::test]
async fn test_analysis_renders_overview_and_suggestions() {
    let server = MockServer::start_async().await;
    let analyze = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/analyze/")
                .body_includes("name=\"resume_file\"")
                .body_includes("name=\"jd_file\"")
                .body_includes("name=\"min_match_percentage\"")
                .body_includes("0.40");
            then.status(200).json_body(analysis_body(72.0));
        })
        .await;

    let (controller, _) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;
    analyze.assert_async().await;

    let state = controller.snapshot();
    assert!(state.error.is_none());

    let overview = render_results(&state).expect("results should be visible").to_string();
    assert!(overview.contains("72%"));
    assert_eq!(overview.matches("  > ").count(), 1);
    assert!(overview.contains("Missing metrics"));

    controller.select_tab(ResultTab::Suggestions);
    let state = controller.snapshot();
    let view = render_results(&state).expect("results should be visible");
    let expected = vec!["Add 'Kubernetes'".to_string()];
    assert_eq!(
        view.panel,
        TabPanel::Suggestions {
            chips: expected.as_slice()
        }
    );
}

#[tokio::test]
async fn test_analysis_rejection_uses_detail() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze/");
            then.status(500).json_body(json!({"detail": "parser crashed"}));
        })
        .await;

    let (controller, _) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;

    let state = controller.snapshot();
    assert_eq!(state.error_message().as_deref(), Some("parser crashed"));
    assert!(state.analysis.is_none());
    assert!(!state.loading.analyzing);
}

#[tokio::test]
async fn test_analysis_rejection_without_detail_cites_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze/");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let (controller, _) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;

    assert_eq!(
        controller.snapshot().error_message().as_deref(),
        Some("Analysis failed with status 502")
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_generic_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze/");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let (controller, _) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;

    let state = controller.snapshot();
    assert_eq!(
        state.error_message().as_deref(),
        Some("An unknown error occurred during analysis.")
    );
    assert!(state.analysis.is_none());
}

#[tokio::test]
async fn test_unreachable_backend_is_generic_failure() {
    let (controller, _) = controller_for("http://127.0.0.1:1");
    select_documents(&controller);
    controller.analyze().await;

    let state = controller.snapshot();
    assert_eq!(
        state.error_message().as_deref(),
        Some("An unknown error occurred during analysis.")
    );
    assert!(!state.loading.analyzing);
}

#[tokio::test]
async fn test_low_score_blocks_optimize_without_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze/");
            then.status(200).json_body(analysis_body(25.0));
        })
        .await;
    let optimize = server
        .mock_async(|when, then| {
            when.method(POST).path("/optimize/");
            then.status(200)
                .json_body(json!({"optimization_status": "success", "optimized_resume_text": "x"}));
        })
        .await;

    let (controller, _) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;
    assert!(!controller.snapshot().optimize_enabled());

    controller.optimize().await;

    let state = controller.snapshot();
    assert!(state.error.is_some());
    assert!(state.optimization.is_none());
    optimize.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_optimize_then_download() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze/");
            then.status(200).json_body(analysis_body(55.0));
        })
        .await;
    let optimize = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/optimize/")
                .body_includes("name=\"required_match_for_optimization\"");
            then.status(200).json_body(json!({
                "message": "Resume optimized successfully.",
                "optimization_status": "success",
                "original_match_percentage": 55.0,
                "optimized_resume_text": "John Doe\n..."
            }));
        })
        .await;

    let (controller, downloader) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;
    assert!(controller.snapshot().optimize_enabled());

    controller.optimize().await;
    optimize.assert_async().await;

    let state = controller.snapshot();
    assert_eq!(state.active_result_tab, ResultTab::Optimized);
    let view = render_results(&state).expect("results should be visible");
    assert_eq!(view.tabs.len(), 4);
    assert_eq!(view.panel, TabPanel::Optimized { text: "John Doe\n..." });

    controller.select_tab(ResultTab::Download);
    controller.download_optimized();

    let emitted = downloader.emitted();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].content, "John Doe\n...");
    assert_eq!(emitted[0].mime_type, "text/plain");
    let millis = emitted[0]
        .filename
        .strip_prefix("optimized_resume_")
        .and_then(|rest| rest.strip_suffix(".txt"))
        .expect("unexpected download name");
    assert!(millis.parse::<u64>().is_ok());
}

#[tokio::test]
async fn test_optimize_rejection_keeps_analysis() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/analyze/");
            then.status(200).json_body(analysis_body(64.0));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/optimize/");
            then.status(503).json_body(json!({
                "detail": "AI optimization service is not configured (API Key missing)."
            }));
        })
        .await;

    let (controller, downloader) = controller_for(&server.base_url());
    select_documents(&controller);
    controller.analyze().await;
    controller.optimize().await;

    let state = controller.snapshot();
    assert_eq!(
        state.error_message().as_deref(),
        Some("AI optimization service is not configured (API Key missing).")
    );
    assert!(state.analysis.is_some());
    assert!(state.optimization.is_none());
    assert_eq!(render_results(&state).map(|v| v.tabs.len()), Some(2));

    controller.download_optimized();
    assert!(downloader.emitted().is_empty());
}

#[tokio::test]
async fn test_welcome_endpoint() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(200).json_body(json!({
                "message": "Welcome to the Resume-JD Matcher API. Go to /docs for API documentation."
            }));
        })
        .await;

    let client = ServiceClient::new(&format!("{}/", server.base_url()), 5).unwrap();
    let welcome = client.welcome().await.unwrap();
    assert!(welcome.message.starts_with("Welcome"));
}
