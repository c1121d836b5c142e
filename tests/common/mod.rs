/*!
 * Common test utilities for the ng-i18n-tools test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use ng_i18n_tools::app_config::Config;
use ng_i18n_tools::app_controller::Controller;
use ng_i18n_tools::errors::{I18nError, Result as I18nResult};
use ng_i18n_tools::extraction::ExtractionRunner;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// XLIFF 2.0 document with `count` units `unit-1..` whose segments carry `state`
pub fn xliff2_document(count: usize, target_lang: &str, state: &str) -> String {
    let mut units = String::new();
    for i in 1..=count {
        units.push_str(&format!(
            "    <unit id=\"unit-{i}\">
      <segment state=\"{state}\">
        <source>Source {i}</source>
        <target>Target {i}</target>
      </segment>
    </unit>\n"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>
<xliff version=\"2.0\" xmlns=\"urn:oasis:names:tc:xliff:document:2.0\" srcLang=\"de\" trgLang=\"{target_lang}\">
  <file id=\"ngi18n\" original=\"ng.template\">
{units}  </file>
</xliff>"
    )
}

/// XLIFF 1.2 document with `count` trans-units whose targets are `initial`
pub fn xliff12_document(count: usize, target_lang: &str) -> String {
    let mut units = String::new();
    for i in 1..=count {
        units.push_str(&format!(
            "      <trans-unit id=\"unit-{i}\" datatype=\"html\">
        <source>Source {i}</source>
        <target state=\"initial\">Target {i}</target>
      </trans-unit>\n"
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>
<xliff version=\"1.2\" xmlns=\"urn:oasis:names:tc:xliff:document:1.2\">
  <file source-language=\"de\" target-language=\"{target_lang}\" datatype=\"plaintext\" original=\"ng.template\">
    <body>
{units}    </body>
  </file>
</xliff>"
    )
}

/// Two-unit XLIFF 2.0 file with the state kept on the target elements
pub const LEGACY_XLIFF2: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<xliff version="2.0" xmlns="urn:oasis:names:tc:xliff:document:2.0" srcLang="en" trgLang="de">
  <file id="ngi18n" original="ng.template">
    <unit id="1">
      <segment>
        <source>Hello</source>
        <target state="initial">Hello</target>
      </segment>
    </unit>
    <unit id="2">
      <segment>
        <source>World</source>
        <target state="translated">Welt</target>
      </segment>
    </unit>
  </file>
</xliff>"#;

/// angular.json with a German source locale and two target locales
pub const ANGULAR_JSON: &str = r#"{
  "version": 1,
  "projects": {
    "shop": {
      "i18n": {
        "sourceLocale": "de",
        "locales": {
          "en": "src/locale/messages.en.xlf",
          "fr": "src/locale/messages.fr.xlf"
        }
      },
      "architect": {
        "extract-i18n": {
          "options": { "format": "xlf" }
        }
      }
    },
    "admin": {
      "i18n": { "sourceLocale": "en" }
    }
  }
}"#;

/// Extraction runner that records its calls instead of spawning a process
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Mutex<Vec<(PathBuf, String)>>,
    pub fail: bool,
}

impl RecordingRunner {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn recorded(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionRunner for RecordingRunner {
    async fn run(&self, output_dir: &Path, format: &str) -> I18nResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((output_dir.to_path_buf(), format.to_string()));
        if self.fail {
            return Err(I18nError::ExternalTool {
                command: "ng extract-i18n".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "boom".to_string(),
            });
        }
        Ok(())
    }
}

/// Workspace layout used by controller tests: `<root>/src/locale` and `<root>/angular.json`
pub struct TestWorkspace {
    pub dir: TempDir,
    pub runner: Arc<RecordingRunner>,
    pub controller: Controller,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Self::with_runner(RecordingRunner::default())
    }

    pub fn with_runner(runner: RecordingRunner) -> Result<Self> {
        let dir = create_temp_dir()?;
        let runner = Arc::new(runner);
        let config = Config {
            locale_dir: dir.path().join("src").join("locale"),
            working_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let controller = Controller::with_runner(config, runner.clone())?;
        Ok(Self {
            dir,
            runner,
            controller,
        })
    }

    pub fn locale_dir(&self) -> PathBuf {
        self.dir.path().join("src").join("locale")
    }

    pub fn locale_file(&self, locale: &str) -> PathBuf {
        self.locale_dir().join(format!("messages.{}.xlf", locale))
    }

    pub fn write_locale(&self, locale: &str, content: &str) -> Result<PathBuf> {
        create_test_file(&self.locale_dir(), &format!("messages.{}.xlf", locale), content)
    }

    pub fn read_locale(&self, locale: &str) -> Result<String> {
        Ok(fs::read_to_string(self.locale_file(locale))?)
    }

    pub fn write_descriptor(&self, content: &str) -> Result<PathBuf> {
        create_test_file(self.dir.path(), "angular.json", content)
    }
}
