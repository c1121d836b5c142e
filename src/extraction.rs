/*!
 * Running the Angular CLI message extraction.
 *
 * The extraction tool only depends on the `ExtractionRunner` trait so the
 * process invocation can be replaced in tests.
 */

use async_trait::async_trait;
use log::{debug, info};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::errors::{I18nError, Result};
use crate::file_utils::FileManager;

/// Capability to run the external extraction toolchain
#[async_trait]
pub trait ExtractionRunner: Send + Sync + Debug {
    /// Extract messages into `output_dir` using the given output `format`
    ///
    /// # Returns
    /// * `Result<()>` - Ok when the toolchain exited successfully
    async fn run(&self, output_dir: &Path, format: &str) -> Result<()>;
}

/// Program and arguments of an extraction invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs `ng extract-i18n` from the project's working directory
#[derive(Debug, Clone)]
pub struct NgCliRunner {
    // @field: Angular workspace root
    working_dir: PathBuf,
}

impl NgCliRunner {
    pub fn new<P: Into<PathBuf>>(working_dir: P) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    fn node_modules(&self) -> PathBuf {
        self.working_dir.join("node_modules")
    }

    // @returns: Local ng.js when the workspace has @angular/cli installed
    fn local_ng(&self) -> Option<PathBuf> {
        let ng = self
            .node_modules()
            .join("@angular")
            .join("cli")
            .join("bin")
            .join("ng.js");
        FileManager::file_exists(&ng).then_some(ng)
    }

    /// Build the command: the local `ng.js` through node, otherwise `npx ng`
    pub fn command_line(&self, output_dir: &Path, format: &str) -> CommandLine {
        let (program, mut args) = match self.local_ng() {
            Some(ng) => ("node".to_string(), vec![ng.to_string_lossy().into_owned()]),
            None => ("npx".to_string(), vec!["ng".to_string()]),
        };
        args.push("extract-i18n".to_string());
        args.push("--output-path".to_string());
        args.push(output_dir.to_string_lossy().into_owned());
        args.push(format!("--format={}", format));
        CommandLine { program, args }
    }
}

#[async_trait]
impl ExtractionRunner for NgCliRunner {
    async fn run(&self, output_dir: &Path, format: &str) -> Result<()> {
        let command_line = self.command_line(output_dir, format);
        info!("Running {}", command_line);

        let output = Command::new(&command_line.program)
            .args(&command_line.args)
            .current_dir(&self.working_dir)
            .env("NODE_PATH", self.node_modules())
            .output()
            .await
            .map_err(|e| I18nError::ExternalTool {
                command: command_line.to_string(),
                status: format!("failed to start: {}", e),
                stderr: String::new(),
            })?;

        if !output.status.success() {
            return Err(I18nError::ExternalTool {
                command: command_line.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("{}", String::from_utf8_lossy(&output.stdout).trim());
        Ok(())
    }
}
