use std::path::{Path, PathBuf};

/// Maps locale identifiers to translation file paths
///
/// The base file is `messages.xlf`; each locale has its own
/// `messages.<locale>.xlf` next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolver {
    // @field: Directory holding the translation files
    locale_dir: PathBuf,
}

impl LocaleResolver {
    pub fn new<P: Into<PathBuf>>(locale_dir: P) -> Self {
        Self {
            locale_dir: locale_dir.into(),
        }
    }

    pub fn locale_dir(&self) -> &Path {
        &self.locale_dir
    }

    // @returns: Path of the base file when `locale` is absent or empty
    pub fn xlf_path(&self, locale: Option<&str>) -> PathBuf {
        match locale.filter(|l| !l.is_empty()) {
            Some(locale) => self.locale_dir.join(format!("messages.{}.xlf", locale)),
            None => self.locale_dir.join("messages.xlf"),
        }
    }
}
