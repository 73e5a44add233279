//! All error types for the numerus crate.
//!
//! Errors are only produced while loading catalogs and at the plural rule
//! boundary. Resolving a message never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown catalog format `{0}`")]
    UnknownFormat(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate message id `{id}` in catalog `{locale}`")]
    DuplicateId { locale: String, id: String },

    #[error(
        "message `{id}` in catalog `{locale}` has {found} plural form(s), the locale requires {expected}"
    )]
    PluralArity {
        locale: String,
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid quantity {0}: plural selection requires a non-negative count")]
    InvalidQuantity(i64),

    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    #[error("catalog declares language `{declared}` but was loaded as `{expected}`")]
    LocaleMismatch { expected: String, declared: String },
}

impl Error {
    /// Creates a new parse error for malformed catalog structure.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Whether the error describes broken catalog content, as opposed to an
    /// I/O failure or a bad argument.
    pub fn is_catalog_defect(&self) -> bool {
        matches!(
            self,
            Error::Parse(_)
                | Error::XmlParse(_)
                | Error::Json(_)
                | Error::DuplicateId { .. }
                | Error::PluralArity { .. }
                | Error::LocaleMismatch { .. }
        )
    }
}
