use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Defaults shipped with the crate; validated by `build.rs`.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub normalize: NormalizeConfig,
    pub typst: TypstConfig,
    pub html: HtmlConfig,
}

/// Word tables and switches for the plain-text normalizer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Run the normalizer at all. Off means the input is treated as markdown.
    pub enabled: bool,
    pub header_emojis: Vec<String>,
    pub action_verbs: Vec<String>,
    pub button_words: Vec<String>,
    /// Lines ending in `:` shorter than this become `###` headers.
    pub max_colon_header_len: usize,
}

/// Word tables of the embedded `[normalize]` section. No field has a serde
/// default, so reading them never goes back through `NormalizeConfig::default`.
#[derive(Debug, Default, Deserialize)]
struct WordTables {
    header_emojis: Vec<String>,
    action_verbs: Vec<String>,
    button_words: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddedDefaults {
    normalize: WordTables,
}

// build.rs rejects a default file without these tables.
static DEFAULT_WORD_TABLES: Lazy<WordTables> =
    Lazy::new(|| match toml::from_str::<EmbeddedDefaults>(DEFAULT_CONFIG) {
        Ok(defaults) => defaults.normalize,
        Err(e) => {
            log::warn!("embedded word tables are invalid, normalizer rules will not match: {e}");
            WordTables::default()
        }
    });

impl Default for NormalizeConfig {
    fn default() -> Self {
        let words = &*DEFAULT_WORD_TABLES;
        Self {
            enabled: true,
            header_emojis: words.header_emojis.clone(),
            action_verbs: words.action_verbs.clone(),
            button_words: words.button_words.clone(),
            max_colon_header_len: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypstConfig {
    /// Wrap each heading and the block after it in one unbreakable block.
    pub keep_heading_with_next: bool,
    /// Lists with at most this many items are kept on one page.
    pub unbreakable_list_max_items: usize,
}

impl Default for TypstConfig {
    fn default() -> Self {
        Self {
            keep_heading_with_next: true,
            unbreakable_list_max_items: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    /// Wrap output in `<div class="formatted-text ...">`.
    pub wrap_container: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            wrap_container: true,
        }
    }
}

impl Config {
    /// The embedded default configuration.
    pub fn compiled_default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("embedded default config is invalid, using built-in defaults: {e}");
                Self::default()
            }
        }
    }

    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::compiled_default())
        }
    }
}
