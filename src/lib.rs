/*!
 * # ng-i18n-tools
 *
 * Maintenance tools for Angular XLIFF translation files.
 *
 * ## Features
 *
 * - Run `ng extract-i18n` for the workspace
 * - List all or only untranslated units of a locale file, page by page
 * - Update one unit or up to 50 units in a single write
 * - Read the i18n settings of the workspace from `angular.json`
 * - XLIFF 1.2 (`trans-unit`) and XLIFF 2.0 (`unit`/`segment`) files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Tool registry and dispatch
 * - `locale_resolver`: Locale to file path mapping
 * - `xliff`: Document model, unit index, queries and mutations
 * - `settings`: angular.json reader
 * - `extraction`: Angular CLI extraction runner
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod locale_resolver;
pub mod settings;
pub mod xliff;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ToolDescriptor, ToolResponse};
pub use errors::{ErrorKind, I18nError};
pub use extraction::{ExtractionRunner, NgCliRunner};
pub use locale_resolver::LocaleResolver;
pub use settings::SettingsReader;
pub use xliff::{TranslationDocument, TranslationUnit, UnitFilter, UnitPage};
