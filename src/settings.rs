/*!
 * Read-only access to the Angular workspace descriptor (`angular.json`).
 *
 * Only the first project of the `projects` mapping is consulted. Workspaces
 * with several projects cannot select another one; this is a known
 * limitation of the tool surface.
 */

use log::debug;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::errors::{I18nError, Result};
use crate::file_utils::FileManager;

pub const DESCRIPTOR_FILE: &str = "angular.json";
pub const DEFAULT_EXTRACTION_FORMAT: &str = "xlf2";

/// Reader for project-level localization settings
#[derive(Debug, Clone)]
pub struct SettingsReader {
    working_dir: PathBuf,
}

impl SettingsReader {
    pub fn new<P: Into<PathBuf>>(working_dir: P) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.working_dir.join(DESCRIPTOR_FILE)
    }

    /// The `i18n` object of the first project, or an empty map.
    ///
    /// Fails when the descriptor is missing or malformed, or defines no
    /// projects.
    pub async fn read_settings(&self) -> Result<Map<String, Value>> {
        let project = self.first_project().await?;
        Ok(project
            .get("i18n")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default())
    }

    /// Output format configured for `extract-i18n`, or `xlf2`.
    ///
    /// Any failure while reading the descriptor falls back to the default.
    pub async fn extraction_format(&self) -> String {
        match self.first_project().await {
            Ok(project) => project
                .pointer("/architect/extract-i18n/options/format")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_EXTRACTION_FORMAT.to_string()),
            Err(e) => {
                debug!("Using default extraction format: {}", e);
                DEFAULT_EXTRACTION_FORMAT.to_string()
            }
        }
    }

    async fn first_project(&self) -> Result<Value> {
        let path = self.descriptor_path();
        let descriptor = read_descriptor(&path).await?;
        let projects = descriptor
            .get("projects")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                I18nError::Config(format!("{} has no \"projects\" mapping", path.display()))
            })?;

        // serde_json keeps insertion order, so this is the first project as written
        let (name, project) = projects.iter().next().ok_or_else(|| {
            I18nError::Config(format!("No projects found in {}", path.display()))
        })?;
        debug!("Reading settings of project {}", name);
        Ok(project.clone())
    }
}

async fn read_descriptor(path: &Path) -> Result<Value> {
    let content = FileManager::read_to_string(path).await?;
    serde_json::from_str(&content)
        .map_err(|e| I18nError::Parse(format!("{}: {}", path.display(), e)))
}
