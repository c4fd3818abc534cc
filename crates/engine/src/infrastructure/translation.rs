//! Translation adapters.
//!
//! The catalog format is a JSON document of entries:
//!
//! ```json
//! { "entries": [
//!     { "msgid": "left arm", "msgstr": ["linker Arm"] },
//!     { "msgctxt": "bodypart_accusative", "msgid": "left arm", "msgstr": ["linken Arm"] },
//!     { "msgid": "ARM", "msgid_plural": "ARMS", "msgstr": ["ARM", "ARME"] }
//! ] }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infrastructure::ports::TranslatorPort;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("failed to read catalog {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("failed to parse catalog {}: {error}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}

/// English plural rule: form 0 for exactly one, form 1 otherwise.
fn plural_index(count: u64) -> usize {
    usize::from(count != 1)
}

/// Returns source strings unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranslator;

impl TranslatorPort for PassthroughTranslator {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }

    fn translate_plural(&self, singular: &str, plural: &str, count: u64) -> String {
        match plural_index(count) {
            0 => singular.to_string(),
            _ => plural.to_string(),
        }
    }

    fn translate_context(&self, _context: &str, msgid: &str) -> String {
        msgid.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    msgctxt: Option<String>,
    msgid: String,
    #[serde(default)]
    msgid_plural: Option<String>,
    msgstr: Vec<String>,
}

/// Translator backed by a JSON message catalog.
///
/// Messages without an entry (or with an empty translation) pass through.
#[derive(Debug, Default)]
pub struct CatalogTranslator {
    messages: HashMap<(Option<String>, String), Vec<String>>,
}

impl CatalogTranslator {
    pub fn from_path(path: &Path) -> Result<Self, TranslationError> {
        let text = std::fs::read_to_string(path).map_err(|error| TranslationError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let translator = Self::from_json(&text).map_err(|error| TranslationError::Json {
            path: path.to_path_buf(),
            error,
        })?;
        tracing::info!(
            path = %path.display(),
            entries = translator.messages.len(),
            "Loaded translation catalog"
        );
        Ok(translator)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let messages = file
            .entries
            .into_iter()
            .map(|entry| {
                if entry.msgid_plural.is_some() && entry.msgstr.len() < 2 {
                    tracing::debug!(msgid = %entry.msgid, "Plural entry with fewer than two forms");
                }
                ((entry.msgctxt, entry.msgid), entry.msgstr)
            })
            .collect();
        Ok(Self { messages })
    }

    fn lookup(&self, context: Option<&str>, msgid: &str, form: usize) -> Option<&str> {
        self.messages
            .get(&(context.map(str::to_string), msgid.to_string()))
            .and_then(|forms| forms.get(form))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl TranslatorPort for CatalogTranslator {
    fn translate(&self, msgid: &str) -> String {
        self.lookup(None, msgid, 0).unwrap_or(msgid).to_string()
    }

    fn translate_plural(&self, singular: &str, plural: &str, count: u64) -> String {
        let form = plural_index(count);
        self.lookup(None, singular, form)
            .map(str::to_string)
            .unwrap_or_else(|| PassthroughTranslator.translate_plural(singular, plural, count))
    }

    fn translate_context(&self, context: &str, msgid: &str) -> String {
        self.lookup(Some(context), msgid, 0)
            .unwrap_or(msgid)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{ "entries": [
        { "msgid": "left arm", "msgstr": ["linker Arm"] },
        { "msgctxt": "bodypart_accusative", "msgid": "left arm", "msgstr": ["linken Arm"] },
        { "msgid": "ARM", "msgid_plural": "ARMS", "msgstr": ["ARM", "ARME"] },
        { "msgid": "untranslated", "msgstr": [""] }
    ] }"#;

    #[test]
    fn passthrough_selects_english_forms() {
        let tr = PassthroughTranslator;
        assert_eq!(tr.translate("head"), "head");
        assert_eq!(tr.translate_plural("ARM", "ARMS", 1), "ARM");
        assert_eq!(tr.translate_plural("ARM", "ARMS", 2), "ARMS");
        assert_eq!(tr.translate_plural("ARM", "ARMS", 0), "ARMS");
        assert_eq!(tr.translate_context("bodypart_accusative", "head"), "head");
    }

    #[test]
    fn catalog_translates_known_messages() {
        let tr = CatalogTranslator::from_json(CATALOG).unwrap();
        assert_eq!(tr.translate("left arm"), "linker Arm");
        assert_eq!(tr.translate_context("bodypart_accusative", "left arm"), "linken Arm");
        assert_eq!(tr.translate_plural("ARM", "ARMS", 1), "ARM");
        assert_eq!(tr.translate_plural("ARM", "ARMS", 3), "ARME");
    }

    #[test]
    fn catalog_passes_unknown_and_empty_messages_through() {
        let tr = CatalogTranslator::from_json(CATALOG).unwrap();
        assert_eq!(tr.translate("tail"), "tail");
        assert_eq!(tr.translate("untranslated"), "untranslated");
        assert_eq!(tr.translate_context("other", "left arm"), "left arm");
        assert_eq!(tr.translate_plural("LEG", "LEGS", 2), "LEGS");
    }

    #[test]
    fn catalog_file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.json");
        std::fs::write(&path, "nope").unwrap();
        let err = CatalogTranslator::from_path(&path).unwrap_err();
        assert!(matches!(err, TranslationError::Json { .. }));
        assert!(err.to_string().contains("de.json"));

        let missing = CatalogTranslator::from_path(&dir.path().join("fr.json")).unwrap_err();
        assert!(matches!(missing, TranslationError::Io { .. }));
    }
}
