// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;

use ng_i18n_tools::app_config::{self, Config};
use ng_i18n_tools::app_controller::{
    Controller, BULK_UPDATE_TRANSLATIONS, EXTRACT_I18N, GET_I18N_SETTINGS, LIST_ALL_TRANSLATIONS,
    LIST_NEW_TRANSLATIONS, UPDATE_TRANSLATION,
};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Target locale (e.g., 'de')
    #[arg(long)]
    locale: String,

    /// Zero-based page index
    #[arg(long)]
    page: Option<usize>,

    /// Units per page (defaults to the configured page size)
    #[arg(long)]
    page_size: Option<usize>,
}

impl ListArgs {
    fn to_json(&self) -> Value {
        json!({ "locale": self.locale, "page": self.page, "pageSize": self.page_size })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the descriptors of all tools as JSON
    Tools,

    /// Call a tool by name with JSON arguments
    Call {
        /// Tool name (see `tools`)
        name: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Run `ng extract-i18n` into the locale directory
    Extract,

    /// List units whose state is 'initial'
    ListNew(ListArgs),

    /// List all units of a locale file
    ListAll(ListArgs),

    /// Update the translation of one unit
    Update {
        /// The unit ID
        #[arg(long)]
        id: String,

        /// Target locale
        #[arg(long)]
        locale: String,

        /// The translated text (may contain inline XLIFF markup)
        #[arg(long)]
        translation: String,
    },

    /// Update several units from a JSON array of {"id", "translation"} objects
    BulkUpdate {
        /// Target locale
        #[arg(long)]
        locale: String,

        /// Updates as inline JSON
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        updates: Option<String>,

        /// File containing the updates JSON
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print the i18n settings from angular.json
    Settings,

    /// Generate shell completions for ng-i18n-tools
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ng-i18n-tools - maintenance tools for Angular XLIFF translation files
#[derive(Parser, Debug)]
#[command(name = "ng-i18n-tools")]
#[command(version)]
#[command(about = "Maintenance tools for Angular XLIFF translation files")]
#[command(long_about = "ng-i18n-tools lists and updates translation units in Angular XLIFF 1.2 and 2.0 files.

EXAMPLES:
    ng-i18n-tools list-new --locale de                      # Untranslated units of messages.de.xlf
    ng-i18n-tools list-all --locale de --page 1 --page-size 20
    ng-i18n-tools update --locale de --id greeting --translation Hallo
    ng-i18n-tools bulk-update --locale de --file updates.json
    ng-i18n-tools call list_all_translations --args '{\"locale\":\"fr\"}'
    ng-i18n-tools completions bash > ng-i18n-tools.bash

CONFIGURATION:
    Settings are read from ng-i18n-tools.json when it exists. The locale
    directory defaults to src/locale and can be set with LOCALE_DIR.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "ng-i18n-tools.json", global = true)]
    config_path: String,

    /// Directory containing the translation files
    #[arg(long, env = "LOCALE_DIR", global = true)]
    locale_dir: Option<PathBuf>,

    /// Angular workspace root
    #[arg(short, long, global = true)]
    working_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            // stdout carries tool output, so logs go to stderr
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info; the configured level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "ng-i18n-tools", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.into());
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config)?;

    let (tool, args) = match cli.command {
        Commands::Tools => {
            let tools = serde_json::to_string_pretty(&controller.list_tools())
                .context("Failed to serialize tool descriptors")?;
            println!("{}", tools);
            return Ok(());
        }
        Commands::Call { name, args } => {
            let args: Value = serde_json::from_str(&args)
                .context("Tool arguments must be a JSON object")?;
            (name, args)
        }
        Commands::Extract => (EXTRACT_I18N.to_string(), Value::Null),
        Commands::ListNew(list) => (LIST_NEW_TRANSLATIONS.to_string(), list.to_json()),
        Commands::ListAll(list) => (LIST_ALL_TRANSLATIONS.to_string(), list.to_json()),
        Commands::Update {
            id,
            locale,
            translation,
        } => (
            UPDATE_TRANSLATION.to_string(),
            json!({ "id": id, "locale": locale, "translation": translation }),
        ),
        Commands::BulkUpdate {
            locale,
            updates,
            file,
        } => {
            let raw = match (updates, file) {
                (Some(inline), _) => inline,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .context(format!("Failed to read updates file: {}", path.display()))?,
                (None, None) => return Err(anyhow!("Either --updates or --file is required")),
            };
            let updates: Value =
                serde_json::from_str(&raw).context("Updates must be a JSON array")?;
            (
                BULK_UPDATE_TRANSLATIONS.to_string(),
                json!({ "locale": locale, "updates": updates }),
            )
        }
        Commands::Settings => (GET_I18N_SETTINGS.to_string(), Value::Null),
        Commands::Completions { .. } => return Ok(()),
    };

    let response = controller.call_tool(&tool, args).await;
    if response.is_error {
        return Err(anyhow!(response.text_content()));
    }

    println!("{}", response.text_content());
    Ok(())
}

// Load the config file, then apply CLI and environment overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load(&cli.config_path)?;

    if let Some(locale_dir) = &cli.locale_dir {
        config.locale_dir = locale_dir.clone();
    }

    if let Some(working_dir) = &cli.working_dir {
        config.working_dir = working_dir.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
