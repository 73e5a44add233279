//! The immutable per-locale message table.

use std::collections::HashMap;

use crate::{
    error::Error,
    locale::Locale,
    plural_rules::PluralRule,
    types::{MessageEntry, MessageId},
};

/// All messages of one locale.
///
/// Entries are stored in file order and indexed by id. A catalog is only ever
/// built through [`Catalog::from_entries`], which enforces unique ids and the
/// plural arity of its locale, and is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    declared_language: Option<String>,
    entries: Vec<MessageEntry>,
    index: HashMap<MessageId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and plural entries whose form
    /// count differs from the locale's category count.
    pub fn from_entries<I>(locale: Locale, entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = MessageEntry>,
    {
        let expected = PluralRule::for_locale(&locale).category_count();
        let entries: Vec<MessageEntry> = entries.into_iter().collect();
        let mut index = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if entry.is_plural && entry.forms.len() != expected {
                return Err(Error::PluralArity {
                    locale: locale.to_string(),
                    id: entry.id.clone(),
                    expected,
                    found: entry.forms.len(),
                });
            }
            if !entry.is_plural && entry.forms.len() != 1 {
                return Err(Error::parse_error(format!(
                    "message `{}` has {} translations but is not plural",
                    entry.id,
                    entry.forms.len()
                )));
            }
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(Error::DuplicateId {
                    locale: locale.to_string(),
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self {
            locale,
            declared_language: None,
            entries,
            index,
        })
    }

    /// An empty catalog.
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            declared_language: None,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Records the language attribute found in the source file.
    pub fn with_declared_language(mut self, language: Option<String>) -> Self {
        self.declared_language = language;
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn declared_language(&self) -> Option<&str> {
        self.declared_language.as_deref()
    }

    /// The plural rule governing this catalog's plural entries.
    pub fn plural_rule(&self) -> PluralRule {
        PluralRule::for_locale(&self.locale)
    }

    /// Any entry with this id, finished or not.
    pub fn get(&self, id: &str) -> Option<&MessageEntry> {
        self.index.get(id).map(|position| &self.entries[*position])
    }

    /// The entry with this id if it is finished, i.e. displayable.
    pub fn lookup(&self, id: &str) -> Option<&MessageEntry> {
        self.get(id).filter(|entry| entry.finished)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.iter().map(|entry| entry.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn finished_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.finished).count()
    }

    /// Share of finished entries, `100.0` for an empty catalog.
    pub fn completion_percent(&self) -> f64 {
        if self.entries.is_empty() {
            return 100.0;
        }
        self.finished_count() as f64 * 100.0 / self.entries.len() as f64
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MessageEntry;
    type IntoIter = std::slice::Iter<'a, MessageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
