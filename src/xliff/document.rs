/*!
 * Loading and saving XLIFF translation files.
 */

use log::debug;
use std::path::Path;

use crate::errors::Result;
use crate::file_utils::FileManager;
use crate::xliff::dom::XmlDocument;

/// A parsed translation file, owned by a single operation
#[derive(Debug, Clone)]
pub struct TranslationDocument {
    xml: XmlDocument,
}

impl TranslationDocument {
    /// Parse a document from XLIFF text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(Self {
            xml: XmlDocument::parse(content)?,
        })
    }

    /// Read and parse the file at `path`.
    ///
    /// A missing file yields `I18nError::FileNotFound`; malformed XML yields
    /// `I18nError::Parse`.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path).await?;
        let document = Self::parse(&content)?;
        debug!("Loaded translation file {:?}", path);
        Ok(document)
    }

    /// Serialize and overwrite the file at `path`
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_xml()?;
        FileManager::write_to_file(path, &content).await?;
        debug!("Saved translation file {:?}", path);
        Ok(())
    }

    /// Serialize to XLIFF text
    pub fn to_xml(&self) -> Result<String> {
        self.xml.to_xml()
    }

    pub fn xml(&self) -> &XmlDocument {
        &self.xml
    }

    pub fn xml_mut(&mut self) -> &mut XmlDocument {
        &mut self.xml
    }
}
