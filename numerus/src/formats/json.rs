//! Support for the JSON catalog document.
//!
//! ```json
//! {
//!   "language": "pl",
//!   "messages": [
//!     { "id": "app-name", "source": "Foil Auth", "translations": ["Foil Auth"] },
//!     { "id": "tokens", "source": "%0 token(s)", "numerus": true,
//!       "translations": ["%0 token", "%0 tokeny", "%0 tokenów"] }
//!   ]
//! }
//! ```

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    formats::{CatalogDocument, MessageRecord},
    traits::Parser,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Format {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    pub id: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracomment: Option<String>,
    #[serde(default)]
    pub translations: Vec<String>,
    #[serde(default)]
    pub numerus: bool,
    #[serde(default)]
    pub unfinished: bool,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }
}

impl From<Format> for CatalogDocument {
    fn from(value: Format) -> Self {
        CatalogDocument {
            language: value.language.filter(|language| !language.trim().is_empty()),
            records: value.messages.into_iter().map(MessageRecord::from).collect(),
        }
    }
}

impl From<Message> for MessageRecord {
    fn from(value: Message) -> Self {
        MessageRecord {
            id: value.id,
            source: value.source,
            comment: value.comment,
            extra_comment: value.extracomment,
            translations: value.translations,
            numerus: value.numerus,
            unfinished: value.unfinished,
        }
    }
}
