/*!
 * Tests for the angular.json settings reader
 */

use anyhow::Result;
use ng_i18n_tools::errors::ErrorKind;
use ng_i18n_tools::settings::SettingsReader;
use crate::common;

/// Test that the first project's i18n block is returned
#[tokio::test]
async fn test_readSettings_withDescriptor_shouldReturnFirstProjectI18n() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "angular.json", common::ANGULAR_JSON)?;

    let settings = SettingsReader::new(temp_dir.path()).read_settings().await?;
    assert_eq!(settings["sourceLocale"], "de");
    assert!(settings["locales"].get("en").is_some());
    Ok(())
}

/// Test that project order follows the descriptor, not alphabetical order
#[tokio::test]
async fn test_readSettings_withSeveralProjects_shouldUseDescriptorOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(
        temp_dir.path(),
        "angular.json",
        r#"{ "projects": { "zeta": { "i18n": { "sourceLocale": "it" } }, "alpha": { "i18n": { "sourceLocale": "es" } } } }"#,
    )?;

    let settings = SettingsReader::new(temp_dir.path()).read_settings().await?;
    assert_eq!(settings["sourceLocale"], "it");
    Ok(())
}

/// Test that a project without i18n yields an empty map
#[tokio::test]
async fn test_readSettings_withoutI18n_shouldReturnEmptyMap() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "angular.json", r#"{ "projects": { "app": {} } }"#)?;

    let settings = SettingsReader::new(temp_dir.path()).read_settings().await?;
    assert!(settings.is_empty());
    Ok(())
}

/// Test the error categories of broken descriptors
#[tokio::test]
async fn test_readSettings_withBrokenDescriptors_shouldReportKinds() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let reader = SettingsReader::new(temp_dir.path());

    let missing = reader.read_settings().await.unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    common::create_test_file(temp_dir.path(), "angular.json", "{ \"projects\": ")?;
    let malformed = reader.read_settings().await.unwrap_err();
    assert_eq!(malformed.kind(), ErrorKind::Parse);

    common::create_test_file(temp_dir.path(), "angular.json", r#"{ "projects": {} }"#)?;
    let empty = reader.read_settings().await.unwrap_err();
    assert_eq!(empty.kind(), ErrorKind::Config);

    common::create_test_file(temp_dir.path(), "angular.json", r#"{ "version": 1 }"#)?;
    let no_projects = reader.read_settings().await.unwrap_err();
    assert_eq!(no_projects.kind(), ErrorKind::Config);
    Ok(())
}

/// Test the extraction format lookup and its fallback
#[tokio::test]
async fn test_extractionFormat_shouldReadOptionOrFallBack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let reader = SettingsReader::new(temp_dir.path());

    assert_eq!(reader.extraction_format().await, "xlf2");

    common::create_test_file(temp_dir.path(), "angular.json", "not json")?;
    assert_eq!(reader.extraction_format().await, "xlf2");

    common::create_test_file(temp_dir.path(), "angular.json", common::ANGULAR_JSON)?;
    assert_eq!(reader.extraction_format().await, "xlf");
    Ok(())
}
