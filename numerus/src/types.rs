//! Core, format-agnostic types for numerus.
//! Parsers decode into these; the resolver reads them.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Stable message identifier, unique within one catalog.
pub type MessageId = String;

/// A single message of a catalog.
///
/// Entries are built once by the loader and only handed out by shared
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
    /// Unique message identifier (the TS `id` attribute).
    pub id: MessageId,

    /// Original text in the authoring language. Used as the fallback.
    pub source: String,

    /// Translation forms. Exactly one for singular messages, one per plural
    /// category of the catalog locale for plural ones.
    pub forms: Vec<String>,

    /// Whether `forms` are selected by quantity.
    pub is_plural: bool,

    /// Unfinished entries are never displayed; the resolver falls back instead.
    pub finished: bool,

    /// Disambiguation note for translators. Never consulted when resolving.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_note: Option<String>,

    /// Developer note (`<extracomment>`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_note: Option<String>,
}

impl MessageEntry {
    /// A finished, non-plural entry.
    pub fn singular(id: impl Into<MessageId>, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            forms: vec![text.into()],
            is_plural: false,
            finished: true,
            context_note: None,
            extra_note: None,
        }
    }

    /// A finished, plural entry. Arity is checked when the entry joins a catalog.
    pub fn plural<I, S>(id: impl Into<MessageId>, source: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            source: source.into(),
            forms: forms.into_iter().map(Into::into).collect(),
            is_plural: true,
            finished: true,
            context_note: None,
            extra_note: None,
        }
    }

    /// Marks the entry unfinished.
    pub fn unfinished(mut self) -> Self {
        self.finished = false;
        self
    }

    /// Attaches a translator note.
    pub fn with_context_note(mut self, note: impl Into<String>) -> Self {
        self.context_note = Some(note.into());
        self
    }

    /// The first form, used for singular entries and for plural entries
    /// resolved without a quantity.
    pub fn first_form(&self) -> &str {
        self.forms.first().map(String::as_str).unwrap_or_default()
    }

    /// The form at `index`, if present.
    pub fn form(&self, index: usize) -> Option<&str> {
        self.forms.get(index).map(String::as_str)
    }

    /// Whether every form is the empty string.
    pub fn is_blank(&self) -> bool {
        self.forms.iter().all(String::is_empty)
    }
}

impl Display for MessageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MessageEntry {{ id: {}, forms: {}, finished: {} }}",
            self.id,
            self.forms.len(),
            self.finished
        )
    }
}

/// Standard CLDR plural categories.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(PluralCategory::Zero),
            "ONE" => Ok(PluralCategory::One),
            "TWO" => Ok(PluralCategory::Two),
            "FEW" => Ok(PluralCategory::Few),
            "MANY" => Ok(PluralCategory::Many),
            "OTHER" => Ok(PluralCategory::Other),
            _ => Err(format!("Unknown plural category: {}", s)),
        }
    }
}
