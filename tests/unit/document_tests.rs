/*!
 * Tests for loading, saving and indexing translation documents
 */

use anyhow::Result;
use ng_i18n_tools::errors::ErrorKind;
use ng_i18n_tools::xliff::{enumerate, TranslationDocument, TranslationUnit};
use crate::common;

/// Snapshot of what a tool reads from a unit: id, source, target and state
fn unit_snapshot(document: &TranslationDocument) -> Vec<(String, String, String, Option<String>)> {
    let xml = document.xml();
    enumerate(xml)
        .iter()
        .map(|unit| {
            (
                unit.id(xml).unwrap_or_default().to_string(),
                unit.source(xml).and_then(|s| xml.text_content(s).ok()).unwrap_or_default(),
                unit.target(xml).and_then(|t| xml.text_content(t).ok()).unwrap_or_default(),
                unit.state(xml).map(str::to_string),
            )
        })
        .collect()
}

/// Test that loading a missing file reports NotFound
#[tokio::test]
async fn test_load_withMissingFile_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let error = TranslationDocument::load(temp_dir.path().join("messages.de.xlf"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
    Ok(())
}

/// Test that malformed XML reports a parse error
#[tokio::test]
async fn test_load_withMalformedXml_shouldReturnParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "messages.de.xlf", "<xliff><file></xliff>")?;
    let error = TranslationDocument::load(&path).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
    Ok(())
}

/// Test that a file with an unescaped ampersand or unknown entity is rejected
#[tokio::test]
async fn test_load_withUnescapedCharacterData_shouldReturnParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for (name, source) in [("amp.xlf", "A & B"), ("entity.xlf", "caf&eacute;")] {
        let content = format!(
            "<xliff version=\"2.0\"><file><unit id=\"1\"><segment><source>{}</source></segment></unit></file></xliff>",
            source
        );
        let path = common::create_test_file(temp_dir.path(), name, &content)?;
        let error = TranslationDocument::load(&path).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse, "{}", name);
    }
    Ok(())
}

/// Test that save(load(path)) keeps every unit's id, source, target and state
#[tokio::test]
async fn test_saveLoad_roundTrip_shouldPreserveUnits() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for (name, content) in [
        ("v2.xlf", common::xliff2_document(4, "en", "initial")),
        ("v12.xlf", common::xliff12_document(3, "fr")),
        ("legacy.xlf", common::LEGACY_XLIFF2.to_string()),
    ] {
        let path = common::create_test_file(temp_dir.path(), name, &content)?;
        let original = TranslationDocument::load(&path).await?;
        original.save(&path).await?;
        let reloaded = TranslationDocument::load(&path).await?;

        assert_eq!(unit_snapshot(&original), unit_snapshot(&reloaded));
        assert!(!unit_snapshot(&reloaded).is_empty());
    }
    Ok(())
}

/// Test that re-serialization keeps namespaces, attributes and whitespace
#[test]
fn test_toXml_withUnmodifiedDocument_shouldKeepMarkup() -> Result<()> {
    let content = common::xliff12_document(2, "en");
    let document = TranslationDocument::parse(&content)?;
    let xml = document.to_xml()?;

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("xmlns=\"urn:oasis:names:tc:xliff:document:1.2\""));
    assert!(xml.contains("<trans-unit id=\"unit-2\" datatype=\"html\">\n        <source>Source 2</source>"));
    Ok(())
}

/// Test that the unit index detects the dialect per unit
#[test]
fn test_enumerate_withBothDialects_shouldClassifyStructurally() -> Result<()> {
    let v2 = TranslationDocument::parse(&common::xliff2_document(2, "en", "initial"))?;
    let v12 = TranslationDocument::parse(&common::xliff12_document(2, "en"))?;

    assert!(enumerate(v2.xml())
        .iter()
        .all(|u| matches!(u, TranslationUnit::Segmented { .. })));
    assert!(enumerate(v12.xml())
        .iter()
        .all(|u| matches!(u, TranslationUnit::Flat { .. })));
    Ok(())
}
