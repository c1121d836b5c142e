/*!
 * Mutable XML tree used for translation files.
 *
 * Nodes live in an arena owned by `XmlDocument` and are addressed by `NodeId`.
 * Text, comments and other character data are stored in their raw (escaped)
 * form so an unmodified document serializes back with the same content.
 * Attribute values are stored unescaped and re-escaped on output.
 */

use quick_xml::escape::unescape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{I18nError, Result};

/// Handle to a node inside an `XmlDocument`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Single attribute of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element name and attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }
}

/// Content of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document itself; parent of the root element
    Document,
    Element(Element),
    /// Raw escaped character data
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    Declaration {
        version: String,
        encoding: Option<String>,
        standalone: Option<String>,
    },
    DocType(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// Arena-backed XML document
#[derive(Debug, Clone)]
pub struct XmlDocument {
    nodes: Vec<Node>,
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlDocument {
    /// Create an empty document containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                children: Vec::new(),
            }],
        }
    }

    /// Parse a complete XML document.
    ///
    /// The input must contain exactly one root element, every start tag must
    /// be closed and end tags must match their start tags.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = true;

        let mut doc = Self::new();
        let mut open = vec![doc.document()];

        loop {
            let parent = open.last().copied().unwrap_or_else(|| doc.document());
            let event = reader.read_event().map_err(|e| {
                I18nError::Parse(format!("{} at byte {}", e, reader.buffer_position()))
            })?;

            match event {
                Event::Start(start) => {
                    let element = element_from_start(&start)?;
                    let id = doc.append(parent, NodeKind::Element(element));
                    open.push(id);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    doc.append(parent, NodeKind::Element(element));
                }
                Event::End(_) => {
                    if open.len() <= 1 {
                        return Err(I18nError::Parse(format!(
                            "unexpected closing tag at byte {}",
                            reader.buffer_position()
                        )));
                    }
                    open.pop();
                }
                Event::Text(text) => {
                    let raw = String::from_utf8_lossy(&text).into_owned();
                    unescape(&raw).map_err(|e| {
                        I18nError::Parse(format!(
                            "invalid character data at byte {}: {}",
                            reader.buffer_position(),
                            e
                        ))
                    })?;
                    if parent == doc.document() && !raw.trim().is_empty() {
                        return Err(I18nError::Parse(
                            "text content outside of the root element".to_string(),
                        ));
                    }
                    doc.append(parent, NodeKind::Text(raw));
                }
                Event::CData(data) => {
                    let raw = String::from_utf8_lossy(&data).into_owned();
                    doc.append(parent, NodeKind::CData(raw));
                }
                Event::Comment(comment) => {
                    let raw = String::from_utf8_lossy(&comment).into_owned();
                    doc.append(parent, NodeKind::Comment(raw));
                }
                Event::PI(pi) => {
                    let raw = String::from_utf8_lossy(&pi).into_owned();
                    doc.append(parent, NodeKind::ProcessingInstruction(raw));
                }
                Event::Decl(decl) => {
                    let version = String::from_utf8_lossy(&decl.version()?).into_owned();
                    let encoding = match decl.encoding() {
                        Some(value) => Some(String::from_utf8_lossy(&value?).into_owned()),
                        None => None,
                    };
                    let standalone = match decl.standalone() {
                        Some(value) => Some(String::from_utf8_lossy(&value?).into_owned()),
                        None => None,
                    };
                    doc.append(
                        parent,
                        NodeKind::Declaration {
                            version,
                            encoding,
                            standalone,
                        },
                    );
                }
                Event::DocType(doctype) => {
                    let raw = String::from_utf8_lossy(&doctype).into_owned();
                    doc.append(parent, NodeKind::DocType(raw));
                }
                Event::Eof => break,
            }
        }

        if open.len() > 1 {
            let name = open
                .last()
                .and_then(|id| doc.element(*id))
                .map(|e| e.name.clone())
                .unwrap_or_default();
            return Err(I18nError::Parse(format!("unclosed element <{}>", name)));
        }

        let roots = doc
            .children(doc.document())
            .iter()
            .filter(|id| doc.element(**id).is_some())
            .count();
        match roots {
            1 => Ok(doc),
            0 => Err(I18nError::Parse("document has no root element".to_string())),
            _ => Err(I18nError::Parse("document has more than one root element".to_string())),
        }
    }

    /// The document node
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// The single root element
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.document())
            .iter()
            .copied()
            .find(|id| self.element(*id).is_some())
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element data, or `None` for non-element nodes
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Local name of an element node
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::local_name)
    }

    /// Unescaped attribute value
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Set an attribute, replacing its value in place or appending it
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            match element.attributes.iter_mut().find(|attr| attr.name == name) {
                Some(attr) => attr.value = value.to_string(),
                None => element.attributes.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            }
        }
    }

    /// Every element below `id` in document order
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            if self.element(next).is_some() {
                found.push(next);
            }
            pending.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    /// Descendant elements whose local name equals `name`, in document order
    pub fn elements_by_name(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendant_elements(id)
            .into_iter()
            .filter(|node| self.local_name(*node) == Some(name))
            .collect()
    }

    /// First descendant element with the given local name
    pub fn first_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.elements_by_name(id, name).into_iter().next()
    }

    /// Concatenated, unescaped text of all text and CDATA descendants
    pub fn text_content(&self, id: NodeId) -> Result<String> {
        let mut text = String::new();
        self.collect_text(id, &mut text)?;
        Ok(text)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) -> Result<()> {
        match self.kind(id) {
            NodeKind::Text(raw) => {
                let value = unescape(raw).map_err(|e| I18nError::Parse(e.to_string()))?;
                out.push_str(&value);
            }
            NodeKind::CData(raw) => out.push_str(raw),
            _ => {
                for child in self.children(id) {
                    self.collect_text(*child, out)?;
                }
            }
        }
        Ok(())
    }

    /// Namespace prefix of an element name, if any
    pub fn prefix(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Create a detached element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.append(
            parent,
            NodeKind::Element(Element {
                name: name.to_string(),
                attributes: Vec::new(),
            }),
        )
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Detach every child of `id`. Detached nodes stay in the arena but are
    /// no longer reachable from the document.
    pub fn clear_children(&mut self, id: NodeId) {
        self.nodes[id.0].children.clear();
    }

    /// Deep-copy `source` (a node of `other`) and append the copy to `parent`
    pub fn import_node(&mut self, parent: NodeId, other: &XmlDocument, source: NodeId) -> NodeId {
        let copy = self.append(parent, other.kind(source).clone());
        for child in other.children(source) {
            self.import_node(copy, other, *child);
        }
        copy
    }

    /// Serialize the whole document
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        for child in self.children(self.document()) {
            self.write_node(&mut writer, *child)?;
        }
        into_string(writer)
    }

    /// Serialize a single node and its subtree as a standalone fragment
    pub fn node_to_xml(&self, id: NodeId) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, id)?;
        into_string(writer)
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        match self.kind(id) {
            NodeKind::Document => {
                for child in self.children(id) {
                    self.write_node(writer, *child)?;
                }
            }
            NodeKind::Element(element) => {
                let mut start = BytesStart::new(element.name.as_str());
                for attr in &element.attributes {
                    start.push_attribute((attr.name.as_str(), attr.value.as_str()));
                }
                let children = self.children(id);
                if children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for child in children {
                        self.write_node(writer, *child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
                }
            }
            NodeKind::Text(raw) => {
                writer.write_event(Event::Text(BytesText::from_escaped(raw.as_str())))?;
            }
            NodeKind::CData(raw) => {
                writer.write_event(Event::CData(BytesCData::new(raw.as_str())))?;
            }
            NodeKind::Comment(raw) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?;
            }
            NodeKind::ProcessingInstruction(raw) => {
                writer.write_event(Event::PI(BytesPI::new(raw.as_str())))?;
            }
            NodeKind::Declaration {
                version,
                encoding,
                standalone,
            } => {
                let decl = BytesDecl::new(version, encoding.as_deref(), standalone.as_deref());
                writer.write_event(Event::Decl(decl))?;
            }
            NodeKind::DocType(raw) => {
                writer.write_event(Event::DocType(BytesText::from_escaped(raw.as_str())))?;
            }
        }
        Ok(())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value: attr.unescape_value()?.into_owned(),
        });
    }
    Ok(Element { name, attributes })
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner())
        .map_err(|e| I18nError::Parse(format!("serialized XML is not UTF-8: {}", e)))
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
