//! Options for loading catalog files.

use crate::formats::CatalogFormat;

/// Load behavior for [`crate::loader::load_catalog_file`] and
/// [`crate::snapshot::Snapshot::load_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Format override. When unset the format is inferred from the file extension.
    pub format: Option<CatalogFormat>,
    /// Fail with [`crate::Error::LocaleMismatch`] when the language declared in a
    /// catalog disagrees with the locale it is loaded as.
    pub strict_language: bool,
}

impl LoadOptions {
    /// Creates default load options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a format.
    pub fn with_format(mut self, format: Option<CatalogFormat>) -> Self {
        self.format = format;
        self
    }

    /// Enables/disables strict language checking.
    pub fn with_strict_language(mut self, strict_language: bool) -> Self {
        self.strict_language = strict_language;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = LoadOptions::new()
            .with_format(Some(CatalogFormat::Json))
            .with_strict_language(true);
        assert_eq!(options.format, Some(CatalogFormat::Json));
        assert!(options.strict_language);
        assert_eq!(LoadOptions::default().format, None);
    }
}
