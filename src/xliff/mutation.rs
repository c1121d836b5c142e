/*!
 * Rewriting unit targets.
 *
 * `apply_update` works purely in memory; `update_one` and `update_batch` add
 * the load/save around it with at most one write per call.
 */

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{I18nError, Result};
use crate::xliff::document::TranslationDocument;
use crate::xliff::dom::XmlDocument;
use crate::xliff::units::{
    enumerate, find_unit, TranslationUnit, STATE_ATTR, STATE_TRANSLATED, TARGET_TAG,
};

/// Name of the synthetic element wrapping translation markup while it is parsed
const FRAGMENT_ROOT: &str = "fragment-root";

/// A single requested change in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitUpdate {
    pub id: String,
    pub translation: String,
}

/// Outcome of a batch update, both lists in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub updated: Vec<String>,
    pub not_found: Vec<String>,
}

/// Parse translation text as a markup fragment
fn parse_fragment(text: &str) -> Result<XmlDocument> {
    XmlDocument::parse(&format!("<{FRAGMENT_ROOT}>{text}</{FRAGMENT_ROOT}>")).map_err(|e| {
        I18nError::Parse(format!("translation is not a well-formed markup fragment: {}", e))
    })
}

/// Replace the target content of unit `id` and mark it translated.
///
/// Returns `Ok(false)` when no unit carries `id`. A translation that is not
/// well-formed markup fails with `I18nError::Parse` and leaves the document
/// untouched.
pub fn apply_update(
    doc: &mut XmlDocument,
    units: &[TranslationUnit],
    id: &str,
    text: &str,
) -> Result<bool> {
    let Some(unit) = find_unit(doc, units, id) else {
        return Ok(false);
    };

    let fragment = parse_fragment(text)?;

    let container = unit.container();
    let target = match unit.target(doc) {
        Some(target) => target,
        None => {
            let name = match doc.prefix(container) {
                Some(prefix) => format!("{}:{}", prefix, TARGET_TAG),
                None => TARGET_TAG.to_string(),
            };
            doc.append_element(container, &name)
        }
    };

    doc.clear_children(target);
    if let Some(fragment_root) = fragment.root_element() {
        for child in fragment.children(fragment_root) {
            doc.import_node(target, &fragment, *child);
        }
    }

    match unit.segment() {
        Some(segment) => {
            doc.set_attribute(segment, STATE_ATTR, STATE_TRANSLATED);
            // Older 2.0 files sometimes keep a state on the target as well
            if doc.attribute(target, STATE_ATTR).is_some() {
                doc.set_attribute(target, STATE_ATTR, STATE_TRANSLATED);
            }
        }
        None => doc.set_attribute(target, STATE_ATTR, STATE_TRANSLATED),
    }

    Ok(true)
}

/// Update one unit of the file at `path` and persist it.
///
/// An unknown id fails with `I18nError::UnitNotFound` without writing.
pub async fn update_one<P: AsRef<Path>>(path: P, id: &str, text: &str) -> Result<String> {
    let path = path.as_ref();
    let mut document = TranslationDocument::load(path).await?;
    let units = enumerate(document.xml());

    if !apply_update(document.xml_mut(), &units, id, text)? {
        return Err(I18nError::UnitNotFound { id: id.to_string() });
    }

    document.save(path).await?;
    info!("Updated unit {} in {:?}", id, path);
    Ok(format!("Updated translation for unit {}", id))
}

/// Apply `updates` in order to the file at `path`, persisting once.
///
/// More than `max_updates` entries fail with `I18nError::Validation` before
/// the file is read. Unknown ids are collected in `not_found` and do not stop
/// the batch.
pub async fn update_batch<P: AsRef<Path>>(
    path: P,
    updates: &[UnitUpdate],
    max_updates: usize,
) -> Result<BatchOutcome> {
    if updates.len() > max_updates {
        return Err(I18nError::Validation(format!(
            "Maximum {} updates allowed per tool call.",
            max_updates
        )));
    }

    let path = path.as_ref();
    let mut document = TranslationDocument::load(path).await?;
    let units = enumerate(document.xml());
    let mut outcome = BatchOutcome::default();

    for update in updates {
        if apply_update(document.xml_mut(), &units, &update.id, &update.translation)? {
            outcome.updated.push(update.id.clone());
        } else {
            warn!("Unit {} not found in {:?}", update.id, path);
            outcome.not_found.push(update.id.clone());
        }
    }

    if !outcome.updated.is_empty() {
        document.save(path).await?;
    }
    info!(
        "Bulk update of {:?}: {} updated, {} not found",
        path,
        outcome.updated.len(),
        outcome.not_found.len()
    );
    Ok(outcome)
}
