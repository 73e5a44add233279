//! Supported catalog file formats.
//!
//! Each format parses into its own document type and then converts into the
//! shared [`CatalogDocument`], which is what the loader validates.

pub mod json;
pub mod ts;

use std::{
    fmt::{Display, Formatter},
    io::BufRead,
    path::Path,
    str::FromStr,
};

pub use json::Format as JsonFormat;
pub use ts::Format as TsFormat;

use crate::{error::Error, traits::Parser};

/// The catalog formats numerus can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFormat {
    /// Qt Linguist `.ts` XML.
    Ts,
    /// The JSON catalog document.
    Json,
}

/// Implements [`std::fmt::Display`] for [`CatalogFormat`].
///
/// # Example
/// ```rust
/// use numerus::formats::CatalogFormat;
/// assert_eq!(CatalogFormat::Ts.to_string(), "ts");
/// assert_eq!(CatalogFormat::Json.to_string(), "json");
/// ```
impl Display for CatalogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogFormat::Ts => write!(f, "ts"),
            CatalogFormat::Json => write!(f, "json"),
        }
    }
}

/// Accepts `"ts"`, `"linguist"`, `"qt"` and `"json"`, case-insensitively.
///
/// # Example
/// ```rust
/// use numerus::formats::CatalogFormat;
/// use std::str::FromStr;
/// assert_eq!(CatalogFormat::from_str("TS").unwrap(), CatalogFormat::Ts);
/// assert_eq!(CatalogFormat::from_str("json").unwrap(), CatalogFormat::Json);
/// assert!(CatalogFormat::from_str("po").is_err());
/// ```
impl FromStr for CatalogFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "ts" | "linguist" | "qt" => Ok(CatalogFormat::Ts),
            "json" => Ok(CatalogFormat::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl CatalogFormat {
    /// Every supported format.
    pub const ALL: [CatalogFormat; 2] = [CatalogFormat::Ts, CatalogFormat::Json];

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            CatalogFormat::Ts => "ts",
            CatalogFormat::Json => "json",
        }
    }

    /// Infers the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::UnknownFormat(path.display().to_string()))?;
        CatalogFormat::from_str(extension)
    }

    /// Parses `input` in this format.
    pub fn parse_str(self, input: &str) -> Result<CatalogDocument, Error> {
        match self {
            CatalogFormat::Ts => ts::Format::from_str(input).map(Into::into),
            CatalogFormat::Json => json::Format::from_str(input).map(Into::into),
        }
    }

    /// Parses from any reader in this format.
    pub fn parse_reader<R: BufRead>(self, reader: R) -> Result<CatalogDocument, Error> {
        match self {
            CatalogFormat::Ts => ts::Format::from_reader(reader).map(Into::into),
            CatalogFormat::Json => json::Format::from_reader(reader).map(Into::into),
        }
    }

    /// Reads and parses a file in this format.
    pub fn read_file<P: AsRef<Path>>(self, path: P) -> Result<CatalogDocument, Error> {
        match self {
            CatalogFormat::Ts => ts::Format::read_from(path).map(Into::into),
            CatalogFormat::Json => json::Format::read_from(path).map(Into::into),
        }
    }
}

/// A parsed catalog file, before validation against a locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDocument {
    /// Language declared inside the file, if any.
    pub language: Option<String>,
    pub records: Vec<MessageRecord>,
}

/// One message as it appears in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: String,
    pub source: String,
    pub comment: Option<String>,
    pub extra_comment: Option<String>,
    /// Translation variants in file order. Plural records carry one per category.
    pub translations: Vec<String>,
    /// Explicit plural marker (`numerus="yes"`).
    pub numerus: bool,
    pub unfinished: bool,
}

impl MessageRecord {
    /// Whether the record has no translated text at all.
    pub fn is_blank(&self) -> bool {
        self.translations.iter().all(String::is_empty)
    }

    /// Plural when marked numerus or carrying more than one variant.
    pub fn is_plural(&self) -> bool {
        self.numerus || self.translations.len() > 1
    }
}
