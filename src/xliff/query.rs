/*!
 * Filtering and pagination over the unit index.
 */

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::xliff::dom::XmlDocument;
use crate::xliff::units::TranslationUnit;

/// Which units a listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFilter {
    /// Every unit
    All,
    /// Units whose state marker is `initial`
    NewOnly,
}

impl UnitFilter {
    pub fn matches(&self, doc: &XmlDocument, unit: &TranslationUnit) -> bool {
        match self {
            Self::All => true,
            Self::NewOnly => unit.is_new(doc),
        }
    }
}

/// One page of serialized units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPage {
    /// Size of the filtered set
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    /// `None` when this is the last page
    pub next_page: Option<usize>,
    /// Each unit's subtree as an XML fragment
    pub units: Vec<String>,
}

/// Filter `units` and return the zero-based page `page` of `page_size` entries
pub fn query(
    doc: &XmlDocument,
    units: &[TranslationUnit],
    filter: UnitFilter,
    page: usize,
    page_size: usize,
) -> Result<UnitPage> {
    let filtered: Vec<&TranslationUnit> = units
        .iter()
        .filter(|unit| filter.matches(doc, unit))
        .collect();

    let total_count = filtered.len();
    let start = page.saturating_mul(page_size);
    let end = start.saturating_add(page_size);

    let units = filtered
        .iter()
        .skip(start)
        .take(page_size)
        .map(|unit| doc.node_to_xml(unit.node()))
        .collect::<Result<Vec<_>>>()?;

    Ok(UnitPage {
        total_count,
        page,
        page_size,
        next_page: (end < total_count).then(|| page + 1),
        units,
    })
}
