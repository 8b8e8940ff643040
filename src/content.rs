/*!
 * The content document shared by every pipeline stage.
 *
 * A `Content` is created by the front end, annotated by the text robot,
 * persisted, and then consumed by the video robot. The JSON form uses
 * camelCase keys so that the render script can read it directly.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Version written into every saved document
pub const SCHEMA_VERSION: u32 = 1;

/// Default cap on the number of sentences kept from an article
pub const DEFAULT_MAXIMUM_SENTENCES: usize = 7;

/// Phrasing template shown before the search term in the video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prefix {
    #[serde(rename = "Quem e")]
    WhoIs,
    #[serde(rename = "O que e")]
    WhatIs,
    #[serde(rename = "A historia de")]
    HistoryOf,
}

impl Prefix {
    /// All prefixes in menu order
    pub const ALL: [Prefix; 3] = [Prefix::WhoIs, Prefix::WhatIs, Prefix::HistoryOf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhoIs => "Quem e",
            Self::WhatIs => "O que e",
            Self::HistoryOf => "A historia de",
        }
    }

    /// Labels in menu order, used by the prompt and the CLI help
    pub fn menu_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.as_str()).collect()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Prefix {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().to_lowercase() == wanted)
            .ok_or_else(|| anyhow!("Invalid prefix: {} (expected one of: {})", s, Self::menu_labels().join(", ")))
    }
}

/// One sentence of the condensed article
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,

    /// Keywords in the order the extractor returned them
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Image references, filled by downstream tooling
    #[serde(default)]
    pub images: Vec<String>,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keywords: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// The document passed through every stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub search_term: String,

    pub prefix: Prefix,

    /// ISO 639-1 article language
    #[serde(default = "default_lang")]
    pub lang: String,

    pub maximum_sentences: usize,

    #[serde(default)]
    pub source_content_original: String,

    #[serde(default)]
    pub source_content_sanitized: String,

    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl Content {
    /// Seed a fresh document as the front end does
    pub fn new(search_term: impl Into<String>, prefix: Prefix, lang: impl Into<String>, maximum_sentences: usize) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            search_term: search_term.into(),
            prefix,
            lang: lang.into(),
            maximum_sentences,
            source_content_original: String::new(),
            source_content_sanitized: String::new(),
            sentences: Vec::new(),
        }
    }

    /// Title used for the video, e.g. "Quem e Ayrton Senna"
    pub fn title(&self) -> String {
        format!("{} {}", self.prefix, self.search_term)
    }

    /// Keep only the first `maximum_sentences` sentences
    pub fn limit_sentences(&mut self) {
        self.sentences.truncate(self.maximum_sentences);
    }
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_lang() -> String {
    "pt".to_string()
}
