/*!
 * Homogeneous view over XLIFF 2.0 `unit` and XLIFF 1.2 `trans-unit` elements.
 *
 * The dialect of each unit is decided by looking at its structure: a unit with
 * a `segment` descendant is treated as XLIFF 2.0, anything else as XLIFF 1.2.
 */

use crate::xliff::dom::{NodeId, XmlDocument};

pub const UNIT_TAG: &str = "unit";
pub const TRANS_UNIT_TAG: &str = "trans-unit";
pub const SEGMENT_TAG: &str = "segment";
pub const TARGET_TAG: &str = "target";
pub const SOURCE_TAG: &str = "source";
pub const STATE_ATTR: &str = "state";
pub const ID_ATTR: &str = "id";

pub const STATE_INITIAL: &str = "initial";
pub const STATE_TRANSLATED: &str = "translated";

/// One translatable record of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationUnit {
    /// XLIFF 2.0: unit → segment → target, state on the segment
    Segmented { unit: NodeId, segment: NodeId },
    /// XLIFF 1.2: trans-unit → target, state on the target
    Flat { unit: NodeId },
}

impl TranslationUnit {
    /// Classify an element by its structure
    pub fn resolve(doc: &XmlDocument, unit: NodeId) -> Self {
        match doc.first_by_name(unit, SEGMENT_TAG) {
            Some(segment) => Self::Segmented { unit, segment },
            None => Self::Flat { unit },
        }
    }

    /// The `unit` / `trans-unit` element
    pub fn node(&self) -> NodeId {
        match self {
            Self::Segmented { unit, .. } | Self::Flat { unit } => *unit,
        }
    }

    pub fn segment(&self) -> Option<NodeId> {
        match self {
            Self::Segmented { segment, .. } => Some(*segment),
            Self::Flat { .. } => None,
        }
    }

    /// Node that holds source and target: the segment, or the unit itself
    pub fn container(&self) -> NodeId {
        self.segment().unwrap_or_else(|| self.node())
    }

    pub fn id<'a>(&self, doc: &'a XmlDocument) -> Option<&'a str> {
        doc.attribute(self.node(), ID_ATTR)
    }

    pub fn target(&self, doc: &XmlDocument) -> Option<NodeId> {
        doc.first_by_name(self.container(), TARGET_TAG)
    }

    pub fn source(&self, doc: &XmlDocument) -> Option<NodeId> {
        doc.first_by_name(self.container(), SOURCE_TAG)
    }

    /// Node where this dialect keeps its state marker
    pub fn state_holder(&self, doc: &XmlDocument) -> Option<NodeId> {
        match self {
            Self::Segmented { segment, .. } => Some(*segment),
            Self::Flat { .. } => self.target(doc),
        }
    }

    /// State marker in its dialect-specific location
    pub fn state<'a>(&self, doc: &'a XmlDocument) -> Option<&'a str> {
        self.state_holder(doc)
            .and_then(|node| doc.attribute(node, STATE_ATTR))
    }

    /// Whether the unit still awaits translation.
    ///
    /// Either the segment or the target carrying `state="initial"` counts.
    pub fn is_new(&self, doc: &XmlDocument) -> bool {
        let on_segment = self
            .segment()
            .and_then(|segment| doc.attribute(segment, STATE_ATTR))
            == Some(STATE_INITIAL);
        let on_target = self
            .target(doc)
            .and_then(|target| doc.attribute(target, STATE_ATTR))
            == Some(STATE_INITIAL);
        on_segment || on_target
    }
}

/// Enumerate all units: every `unit` element, then every `trans-unit` element.
///
/// This is concatenation order, not document order. Documents normally use a
/// single dialect, so the two orders agree in practice.
pub fn enumerate(doc: &XmlDocument) -> Vec<TranslationUnit> {
    let document = doc.document();
    doc.elements_by_name(document, UNIT_TAG)
        .into_iter()
        .chain(doc.elements_by_name(document, TRANS_UNIT_TAG))
        .map(|node| TranslationUnit::resolve(doc, node))
        .collect()
}

/// First unit whose id equals `id` exactly
pub fn find_unit(doc: &XmlDocument, units: &[TranslationUnit], id: &str) -> Option<TranslationUnit> {
    units.iter().copied().find(|unit| unit.id(doc) == Some(id))
}
