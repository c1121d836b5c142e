use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{I18nError, Result};
use crate::extraction::{ExtractionRunner, NgCliRunner};
use crate::locale_resolver::LocaleResolver;
use crate::settings::SettingsReader;
use crate::xliff::{
    enumerate, query, update_batch, update_one, BatchOutcome, TranslationDocument, UnitFilter,
    UnitPage, UnitUpdate,
};

// @module: Tool registry and dispatch

pub const EXTRACT_I18N: &str = "extract_i18n";
pub const LIST_NEW_TRANSLATIONS: &str = "list_new_translations";
pub const LIST_ALL_TRANSLATIONS: &str = "list_all_translations";
pub const UPDATE_TRANSLATION: &str = "update_translation";
pub const BULK_UPDATE_TRANSLATIONS: &str = "bulk_update_translations";
pub const GET_I18N_SETTINGS: &str = "get_i18n_settings";

const EXTRACTION_DONE: &str = "Extraction and merge completed successfully.";

/// Advertised description of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// One content block of a tool response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Result of a tool call; failures carry the error message as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            is_error: true,
            ..Self::text(message)
        }
    }

    /// All text blocks joined by newlines
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Arguments of the listing tools
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArgs {
    pub locale: String,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

/// Arguments of `update_translation`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArgs {
    pub id: String,
    pub locale: String,
    pub translation: String,
}

/// Arguments of `bulk_update_translations`
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateArgs {
    pub locale: String,
    pub updates: Vec<UnitUpdate>,
}

/// Main application controller exposing the translation tools
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    resolver: LocaleResolver,
    settings: SettingsReader,
    runner: Arc<dyn ExtractionRunner>,
}

impl Controller {
    // @method: Create a controller that extracts through the Angular CLI
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        let runner = Arc::new(NgCliRunner::new(config.working_dir.clone()));
        Self::with_runner(config, runner)
    }

    // @method: Create a controller with a custom extraction runner
    pub fn with_runner(config: Config, runner: Arc<dyn ExtractionRunner>) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            resolver: LocaleResolver::new(config.locale_dir.clone()),
            settings: SettingsReader::new(config.working_dir.clone()),
            config,
            runner,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Descriptors of every tool this controller answers
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        let page_size = self.config.default_page_size;
        let list_schema = json!({
            "type": "object",
            "properties": {
                "locale": { "type": "string", "description": "Target locale (e.g., 'de')" },
                "page": { "type": "number", "default": 0 },
                "pageSize": { "type": "number", "default": page_size },
            },
            "required": ["locale"],
        });

        vec![
            ToolDescriptor {
                name: EXTRACT_I18N.to_string(),
                description: "Extract i18n strings and merge into target files using Angular CLI"
                    .to_string(),
                input_schema: json!({ "type": "object", "properties": {} }),
            },
            ToolDescriptor {
                name: LIST_NEW_TRANSLATIONS.to_string(),
                description: "List new (untranslated) units with state='initial'".to_string(),
                input_schema: list_schema.clone(),
            },
            ToolDescriptor {
                name: LIST_ALL_TRANSLATIONS.to_string(),
                description: "List all units in the translation file".to_string(),
                input_schema: list_schema,
            },
            ToolDescriptor {
                name: UPDATE_TRANSLATION.to_string(),
                description: "Update the translation for a specific unit".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "The unit ID" },
                        "locale": { "type": "string", "description": "Target locale" },
                        "translation": { "type": "string", "description": "The translated text" },
                    },
                    "required": ["id", "locale", "translation"],
                }),
            },
            ToolDescriptor {
                name: BULK_UPDATE_TRANSLATIONS.to_string(),
                description: format!(
                    "Update several units in one call (at most {} updates)",
                    self.config.max_bulk_updates
                ),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "locale": { "type": "string", "description": "Target locale" },
                        "updates": {
                            "type": "array",
                            "maxItems": self.config.max_bulk_updates,
                            "items": {
                                "type": "object",
                                "properties": {
                                    "id": { "type": "string", "description": "The unit ID" },
                                    "translation": { "type": "string", "description": "The translated text" },
                                },
                                "required": ["id", "translation"],
                            },
                        },
                    },
                    "required": ["locale", "updates"],
                }),
            },
            ToolDescriptor {
                name: GET_I18N_SETTINGS.to_string(),
                description: "Read the i18n settings (source locale, target locales) from angular.json"
                    .to_string(),
                input_schema: json!({ "type": "object", "properties": {} }),
            },
        ]
    }

    /// Invoke a tool by name. Failures are returned as error responses.
    pub async fn call_tool(&self, name: &str, args: Value) -> ToolResponse {
        debug!("Calling tool {}", name);
        match self.dispatch(name, args).await {
            Ok(text) => ToolResponse::text(text),
            Err(e) => {
                error!("Tool {} failed: {}", name, e);
                ToolResponse::error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<String> {
        match name {
            EXTRACT_I18N => self.extract_i18n().await,
            LIST_NEW_TRANSLATIONS | LIST_ALL_TRANSLATIONS => {
                let filter = if name == LIST_NEW_TRANSLATIONS {
                    UnitFilter::NewOnly
                } else {
                    UnitFilter::All
                };
                let page = self.list_translations(filter, decode_args(name, args)?).await?;
                Ok(serde_json::to_string_pretty(&page)?)
            }
            UPDATE_TRANSLATION => self.update_translation(decode_args(name, args)?).await,
            BULK_UPDATE_TRANSLATIONS => {
                let outcome = self.bulk_update_translations(decode_args(name, args)?).await?;
                Ok(serde_json::to_string_pretty(&outcome)?)
            }
            GET_I18N_SETTINGS => {
                let settings = self.get_i18n_settings().await?;
                Ok(serde_json::to_string_pretty(&settings)?)
            }
            _ => Err(I18nError::Validation(format!("Unknown tool: {}", name))),
        }
    }

    /// Run the extraction toolchain into the locale directory
    pub async fn extract_i18n(&self) -> Result<String> {
        let format = self.settings.extraction_format().await;
        self.runner.run(self.resolver.locale_dir(), &format).await?;
        info!("Extraction into {:?} finished", self.resolver.locale_dir());
        Ok(EXTRACTION_DONE.to_string())
    }

    /// List one page of units from a locale file
    pub async fn list_translations(&self, filter: UnitFilter, args: ListArgs) -> Result<UnitPage> {
        let page = args.page.unwrap_or(0);
        let page_size = match args.page_size {
            Some(size) if size > 0 => size,
            _ => self.config.default_page_size,
        };

        let path = self.resolver.xlf_path(Some(&args.locale));
        let document = TranslationDocument::load(&path).await?;
        let units = enumerate(document.xml());
        query(document.xml(), &units, filter, page, page_size)
    }

    /// Replace the translation of a single unit
    pub async fn update_translation(&self, args: UpdateArgs) -> Result<String> {
        let path = self.resolver.xlf_path(Some(&args.locale));
        update_one(&path, &args.id, &args.translation).await
    }

    /// Replace the translations of several units with a single write
    pub async fn bulk_update_translations(&self, args: BulkUpdateArgs) -> Result<BatchOutcome> {
        let path = self.resolver.xlf_path(Some(&args.locale));
        update_batch(&path, &args.updates, self.config.max_bulk_updates).await
    }

    /// Localization settings of the first project in angular.json
    pub async fn get_i18n_settings(&self) -> Result<Map<String, Value>> {
        self.settings.read_settings().await
    }
}

fn decode_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(args)
        .map_err(|e| I18nError::Validation(format!("Invalid arguments for {}: {}", tool, e)))
}
