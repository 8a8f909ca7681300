//! User-facing text in English and Chinese.
//!
//! Messages are looked up by key in the active language's catalog, then in
//! the English baseline, and finally fall back to the key itself so that a
//! missing translation shows up as its identifier instead of failing.
//!
//! Templates use `{name}` placeholders:
//!
//! ```
//! use bioflow::i18n::{Language, Translator};
//! use bioflow::t;
//!
//! let tr = Translator::new(Language::En);
//! assert_eq!(t!(tr, "env_installing", tool = "BWA"), "Installing BWA...");
//! assert_eq!(t!(tr, "no_such_key"), "no_such_key");
//! ```

mod en;
mod zh;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::config::{ConfigDocument, ConfigStore};

type Catalog = HashMap<&'static str, &'static str>;

static EN_CATALOG: Lazy<Catalog> = Lazy::new(|| en::CATALOG.iter().copied().collect());
static ZH_CATALOG: Lazy<Catalog> = Lazy::new(|| zh::CATALOG.iter().copied().collect());

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Zh,
}

impl Language {
    /// Used when nothing (or something unknown) is configured.
    pub const BASELINE: Language = Language::En;

    /// All languages, in menu order.
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];

    /// The two-letter code stored in the config file.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Name of the language in that language.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
        }
    }

    /// Parses an exact language code.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    fn catalog(self) -> &'static Catalog {
        match self {
            Language::En => &EN_CATALOG,
            Language::Zh => &ZH_CATALOG,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors raised when changing the language.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum I18nError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Result of looking a key up in the catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'static str),
    MissingKey(&'a str),
}

impl<'a> Lookup<'a> {
    /// The template, or the key itself when no catalog has it.
    pub fn or_key(self) -> &'a str {
        match self {
            Lookup::Found(template) => template,
            Lookup::MissingKey(key) => key,
        }
    }
}

/// The active-language context handed to everything that prints text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Uses the document's `language`, or the baseline when absent or unknown.
    pub fn from_config(doc: &ConfigDocument) -> Self {
        let language = doc
            .language()
            .and_then(Language::parse)
            .unwrap_or(Language::BASELINE);
        Self::new(language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Looks `key` up in the active catalog, then in the baseline.
    pub fn lookup<'k>(&self, key: &'k str) -> Lookup<'k> {
        lookup_in(self.language.catalog(), Language::BASELINE.catalog(), key)
    }

    /// Resolves `key` and fills its `{name}` placeholders from `params`.
    ///
    /// Unknown keys come back verbatim. Unused params are ignored.
    pub fn text(&self, key: &str, params: &[(&str, String)]) -> String {
        substitute(self.lookup(key).or_key(), params)
    }

    /// Switches the active language and persists the choice.
    ///
    /// Unknown codes are rejected and leave the active language unchanged.
    pub fn set_language(&mut self, code: &str, store: &ConfigStore) -> Result<(), I18nError> {
        let language =
            Language::parse(code).ok_or_else(|| I18nError::UnsupportedLanguage(code.to_string()))?;
        self.language = language;

        let mut doc = store.load();
        doc.set_language(language.code());
        store.save(&doc);
        Ok(())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::BASELINE)
    }
}

fn lookup_in<'k>(active: &Catalog, baseline: &Catalog, key: &'k str) -> Lookup<'k> {
    active
        .get(key)
        .or_else(|| baseline.get(key))
        .map_or(Lookup::MissingKey(key), |template| Lookup::Found(*template))
}

/// Replaces `{name}` placeholders in a single left-to-right pass.
fn substitute(template: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };

        let name = &after[..end];
        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 2]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Resolves a message through a [`Translator`].
///
/// `t!(tr, "key")` or `t!(tr, "key", name = value, ...)`; values only need
/// to implement `Display`.
#[macro_export]
macro_rules! t {
    ($tr:expr, $key:expr $(,)?) => {
        $tr.text($key, &[])
    };
    ($tr:expr, $key:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $tr.text($key, &[$((stringify!($name), ($value).to_string())),+])
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tempfile::tempdir;

    use super::*;

    fn isolated_store(root: &std::path::Path) -> ConfigStore {
        ConfigStore::with_paths(root.join("cfg"), Some(root.join("legacy_config.json")))
    }

    #[test]
    fn test_translate_en() {
        let tr = Translator::new(Language::En);
        assert!(t!(tr, "menu_env").contains("Install"));
    }

    #[test]
    fn test_translate_zh() {
        let tr = Translator::new(Language::Zh);
        assert!(t!(tr, "menu_env").contains("安装"));
    }

    #[test]
    fn test_missing_key_returns_key() {
        let tr = Translator::new(Language::Zh);
        assert_eq!(tr.lookup("nonexistent_key_xyz"), Lookup::MissingKey("nonexistent_key_xyz"));
        assert_eq!(t!(tr, "nonexistent_key_xyz"), "nonexistent_key_xyz");
        assert_eq!(t!(tr, "nonexistent_key_xyz", tool = "BWA"), "nonexistent_key_xyz");
    }

    #[test]
    fn test_lookup_falls_back_to_baseline() {
        let baseline: Catalog = [("greeting", "Hello"), ("farewell", "Bye")].into_iter().collect();
        let active: Catalog = [("greeting", "你好")].into_iter().collect();

        assert_eq!(lookup_in(&active, &baseline, "greeting"), Lookup::Found("你好"));
        assert_eq!(lookup_in(&active, &baseline, "farewell"), Lookup::Found("Bye"));
        assert_eq!(lookup_in(&active, &baseline, "unknown"), Lookup::MissingKey("unknown"));
    }

    #[test]
    fn test_format_params() {
        let tr = Translator::new(Language::En);
        assert_eq!(t!(tr, "env_installing", tool = "BWA"), "Installing BWA...");
        assert_eq!(
            t!(tr, "seq_done", count = 2, path = "out.fa"),
            "Done! 2 sequences formatted and saved to out.fa."
        );
    }

    #[test]
    fn test_extra_params_are_harmless() {
        let tr = Translator::new(Language::En);
        assert_eq!(t!(tr, "goodbye", tool = "BWA"), "Goodbye!");
    }

    #[test]
    fn test_substitute_single_pass() {
        let params = [("a", "{b}".to_string()), ("b", "x".to_string())];
        assert_eq!(substitute("{a}-{b}-{c}", &params), "{b}-x-{c}");
        assert_eq!(substitute("open {brace", &params), "open {brace");
    }

    #[test]
    fn test_catalogs_have_same_keys() {
        let en: HashSet<_> = en::CATALOG.iter().map(|(k, _)| *k).collect();
        let zh: HashSet<_> = zh::CATALOG.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, zh);
        assert_eq!(en.len(), en::CATALOG.len(), "duplicate key in en catalog");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("zh"), Some(Language::Zh));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse("EN"), None);
    }

    #[test]
    fn test_from_config_falls_back() {
        let mut doc = ConfigDocument::new();
        assert_eq!(Translator::from_config(&doc).language(), Language::En);

        doc.set_language("xx");
        assert_eq!(Translator::from_config(&doc).language(), Language::En);

        doc.set_language("zh");
        assert_eq!(Translator::from_config(&doc).language(), Language::Zh);
    }

    #[test]
    fn test_set_language_persists() {
        let tmp = tempdir().unwrap();
        let store = isolated_store(tmp.path());
        let mut tr = Translator::default();

        tr.set_language("zh", &store).unwrap();
        assert_eq!(tr.language(), Language::Zh);
        assert_eq!(store.load().language(), Some("zh"));

        // A fresh process reading the same location sees the choice
        let next = Translator::from_config(&store.load());
        assert_eq!(next.language(), Language::Zh);
    }

    #[test]
    fn test_set_language_rejects_unknown() {
        let tmp = tempdir().unwrap();
        let store = isolated_store(tmp.path());
        let mut tr = Translator::new(Language::Zh);

        let err = tr.set_language("fr", &store).unwrap_err();
        assert_eq!(err, I18nError::UnsupportedLanguage("fr".to_string()));
        assert_eq!(tr.language(), Language::Zh);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_language_keeps_other_keys() {
        let tmp = tempdir().unwrap();
        let store = isolated_store(tmp.path());
        let mut doc = ConfigDocument::new();
        doc.insert("future_key", serde_json::json!(42));
        store.save(&doc);

        Translator::default().set_language("en", &store).unwrap();

        let doc = store.load();
        assert_eq!(doc.language(), Some("en"));
        assert_eq!(doc.get("future_key"), Some(&serde_json::json!(42)));
    }
}
