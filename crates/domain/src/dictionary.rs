//! Records returned by the dictionary lookup API.
//!
//! A successful lookup returns a JSON array of [`LookupEntry`] records.
//! A failed lookup returns a single [`NotFoundBody`] object.

use serde::{Deserialize, Serialize};

/// Title the API puts on every "no such word" response.
pub const NOT_FOUND_TITLE: &str = "No Definitions Found";

/// One word's definitions, as returned by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    /// The headword.
    pub word: String,
    /// Primary phonetic transcription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    /// All phonetic variants, possibly with audio.
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    /// Meanings grouped by part of speech.
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    /// License of the entry content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// Upstream pages the entry was sourced from.
    #[serde(default)]
    pub source_urls: Vec<String>,
}

impl LookupEntry {
    /// Creates a bare entry carrying only the headword.
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            phonetic: None,
            phonetics: Vec::new(),
            meanings: Vec::new(),
            license: None,
            source_urls: Vec::new(),
        }
    }

    /// Iterates over every definition across all meanings.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.meanings.iter().flat_map(|m| m.definitions.iter())
    }
}

/// A phonetic transcription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phonetic {
    /// IPA text, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Audio URL; the API sends an empty string when there is none.
    #[serde(default)]
    pub audio: String,
    /// Source of the audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Definitions for one part of speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    /// e.g. "noun", "verb", "interjection"
    pub part_of_speech: String,
    /// Definitions in upstream order.
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// Synonyms for the whole meaning.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Antonyms for the whole meaning.
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// A single definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Definition text.
    pub definition: String,
    /// Usage example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Synonyms for this sense.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Antonyms for this sense.
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// License attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// License name, e.g. "CC BY-SA 3.0".
    pub name: String,
    /// License URL.
    pub url: String,
}

/// Error descriptor returned with a 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundBody {
    /// Short title, normally [`NOT_FOUND_TITLE`].
    pub title: String,
    /// Explanation.
    #[serde(default)]
    pub message: String,
    /// Suggested next step.
    #[serde(default)]
    pub resolution: String,
}

impl NotFoundBody {
    /// Returns true if this is the API's canonical "no definitions" error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.title == NOT_FOUND_TITLE
    }
}
