/*!
 * Integration tests for extraction through an injected runner
 */

use anyhow::Result;
use serde_json::json;
use crate::common::{self, RecordingRunner, TestWorkspace};

/// Test that extraction runs into the locale dir with the default format
#[tokio::test]
async fn test_extractI18n_withoutDescriptor_shouldUseDefaultFormat() -> Result<()> {
    let workspace = TestWorkspace::new()?;

    let response = workspace.controller.call_tool("extract_i18n", json!({})).await;
    assert!(!response.is_error);
    assert_eq!(response.text_content(), "Extraction and merge completed successfully.");

    let calls = workspace.runner.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, workspace.locale_dir());
    assert_eq!(calls[0].1, "xlf2");
    Ok(())
}

/// Test that the configured format from angular.json is passed on
#[tokio::test]
async fn test_extractI18n_withDescriptorFormat_shouldPassIt() -> Result<()> {
    let workspace = TestWorkspace::new()?;
    workspace.write_descriptor(common::ANGULAR_JSON)?;

    let response = workspace.controller.call_tool("extract_i18n", serde_json::Value::Null).await;
    assert!(!response.is_error);
    assert_eq!(workspace.runner.recorded()[0].1, "xlf");
    Ok(())
}

/// Test that a failing toolchain becomes an error response
#[tokio::test]
async fn test_extractI18n_withFailingRunner_shouldReturnError() -> Result<()> {
    let workspace = TestWorkspace::with_runner(RecordingRunner::failing())?;

    let response = workspace.controller.call_tool("extract_i18n", json!({})).await;
    assert!(response.is_error);
    assert!(response.text_content().contains("boom"));
    Ok(())
}
