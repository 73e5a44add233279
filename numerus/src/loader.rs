//! Turning catalog files into validated [`Catalog`]s.
//!
//! Parsing is delegated to [`crate::formats`]; this module decides which
//! locale a file belongs to, maps records to [`MessageEntry`] values and lets
//! [`Catalog::from_entries`] enforce ids and plural arity.

use std::{io::BufRead, path::Path};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    error::Error,
    formats::{CatalogDocument, CatalogFormat, MessageRecord},
    locale::Locale,
    options::LoadOptions,
    types::MessageEntry,
};

lazy_static! {
    // `<base>-pl`, `<base>_pt_BR`, `<base>-sr-Latn`
    static ref LOCALE_SUFFIX: Regex =
        Regex::new(r"[-_]([a-z]{2,3}(?:[-_](?:[A-Za-z]{4}|[A-Z]{2}|[0-9]{3}))*)$").unwrap();
    static ref LOCALE_STEM: Regex =
        Regex::new(r"^[a-z]{2,3}(?:[-_](?:[A-Za-z]{4}|[A-Z]{2}|[0-9]{3}))*$").unwrap();
}

/// Parses `raw` as a catalog for `expected_locale`.
///
/// # Example
/// ```rust
/// use numerus::{formats::CatalogFormat, load_catalog, Locale};
/// let raw = r#"<TS language="sv"><context>
///     <message id="menu-lock"><source>Lock</source><translation>Lås</translation></message>
/// </context></TS>"#;
/// let catalog = load_catalog(raw, CatalogFormat::Ts, &Locale::parse("sv").unwrap())?;
/// assert_eq!(catalog.get("menu-lock").unwrap().first_form(), "Lås");
/// Ok::<(), numerus::Error>(())
/// ```
pub fn load_catalog(
    raw: &str,
    format: CatalogFormat,
    expected_locale: &Locale,
) -> Result<Catalog, Error> {
    load_catalog_with(raw, format, expected_locale, &LoadOptions::default())
}

/// [`load_catalog`] with explicit options. `options.format` is ignored since
/// the format is given.
pub fn load_catalog_with(
    raw: &str,
    format: CatalogFormat,
    expected_locale: &Locale,
    options: &LoadOptions,
) -> Result<Catalog, Error> {
    let document = format.parse_str(raw)?;
    build_catalog(document, expected_locale, options)
}

/// Parses a catalog from any reader.
pub fn load_catalog_reader<R: BufRead>(
    reader: R,
    format: CatalogFormat,
    expected_locale: &Locale,
    options: &LoadOptions,
) -> Result<Catalog, Error> {
    let document = format.parse_reader(reader)?;
    build_catalog(document, expected_locale, options)
}

/// Loads a catalog file.
///
/// The format comes from `options.format` or the file extension. When
/// `expected_locale` is `None` the locale is the language declared inside the
/// file, or else the locale suffix of the file name
/// (`harbour-foilauth-pl.ts` is `pl`).
pub fn load_catalog_file<P: AsRef<Path>>(
    path: P,
    expected_locale: Option<&Locale>,
    options: &LoadOptions,
) -> Result<Catalog, Error> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => CatalogFormat::from_path(path)?,
    };
    let document = format.read_file(path)?;

    let locale = match expected_locale {
        Some(locale) => locale.clone(),
        None => document
            .language
            .as_deref()
            .and_then(|language| Locale::parse(language).ok())
            .or_else(|| infer_locale_from_path(path))
            .ok_or_else(|| {
                Error::InvalidLocale(format!(
                    "cannot determine the locale of {}, please provide one",
                    path.display()
                ))
            })?,
    };

    debug!(path = %path.display(), %locale, %format, "loading catalog");
    build_catalog(document, &locale, options)
}

/// Loads a reference catalog, whose file name carries no locale.
///
/// The locale is the language declared inside the file; a file without one
/// fails with [`Error::InvalidLocale`].
pub fn load_reference_file<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
) -> Result<Catalog, Error> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => CatalogFormat::from_path(path)?,
    };
    let document = format.read_file(path)?;

    let declared = document.language.as_deref().ok_or_else(|| {
        Error::InvalidLocale(format!(
            "reference catalog {} declares no language",
            path.display()
        ))
    })?;
    let locale = Locale::parse(declared)?;

    debug!(path = %path.display(), %locale, %format, "loading reference catalog");
    build_catalog(document, &locale, options)
}

/// Infers a locale from a trailing `-<locale>` / `_<locale>` segment of the
/// file stem, or from a stem that is a locale by itself (`pl.ts`).
pub fn infer_locale_from_path<P: AsRef<Path>>(path: P) -> Option<Locale> {
    let stem = path.as_ref().file_stem()?.to_str()?;
    let tag = match LOCALE_SUFFIX.captures(stem) {
        Some(captures) => captures.get(1)?.as_str(),
        None if LOCALE_STEM.is_match(stem) => stem,
        None => return None,
    };
    Locale::parse(tag).ok()
}

/// Validates a parsed document against `locale` and builds the catalog.
pub fn build_catalog(
    document: CatalogDocument,
    locale: &Locale,
    options: &LoadOptions,
) -> Result<Catalog, Error> {
    check_declared_language(document.language.as_deref(), locale, options)?;

    let entries = document
        .records
        .into_iter()
        .map(|record| entry_from_record(record, locale))
        .collect::<Result<Vec<_>, _>>()?;

    let catalog =
        Catalog::from_entries(locale.clone(), entries)?.with_declared_language(document.language);
    debug!(
        %locale,
        entries = catalog.len(),
        finished = catalog.finished_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn check_declared_language(
    declared: Option<&str>,
    locale: &Locale,
    options: &LoadOptions,
) -> Result<(), Error> {
    let Some(declared) = declared else {
        return Ok(());
    };
    let matches = Locale::parse(declared)
        .map(|declared| declared.same_language(locale))
        .unwrap_or(false);
    if matches {
        return Ok(());
    }
    if options.strict_language {
        return Err(Error::LocaleMismatch {
            expected: locale.to_string(),
            declared: declared.to_string(),
        });
    }
    warn!(
        %locale,
        declared,
        "catalog declares a different language, loading it as requested"
    );
    Ok(())
}

fn entry_from_record(record: MessageRecord, locale: &Locale) -> Result<MessageEntry, Error> {
    if record.id.is_empty() {
        return Err(Error::parse_error(format!(
            "message with source `{}` has an empty id",
            record.source
        )));
    }

    let context_note = record.comment.clone().or_else(|| record.extra_comment.clone());

    let is_plural = record.is_plural();
    let blank = record.is_blank();

    // Nothing translated: keep the entry so the id is known, but never show it.
    // Plural forms are kept as written so their count is still checked.
    if blank {
        debug!(%locale, id = %record.id, is_plural, "blank translation, marking unfinished");
    }
    let forms = if blank && !is_plural {
        vec![String::new()]
    } else {
        record.translations
    };

    Ok(MessageEntry {
        id: record.id,
        source: record.source,
        forms,
        is_plural,
        finished: !record.unfinished && !blank,
        context_note,
        extra_note: record.extra_comment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[test]
    fn test_infer_locale_from_path() {
        let cases = [
            ("translations/harbour-foilauth-pl.ts", Some("pl")),
            ("harbour-foilauth-ru.ts", Some("ru")),
            ("app_pt_BR.json", Some("pt-BR")),
            ("app-sr-Latn.ts", Some("sr-Latn")),
            ("sv.ts", Some("sv")),
            ("harbour-foilauth.ts", None),
            ("messages.json", None),
        ];
        for (path, expected) in cases {
            assert_eq!(
                infer_locale_from_path(path).map(|l| l.to_string()),
                expected.map(str::to_string),
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_blank_records_become_unfinished() {
        let raw = indoc! {r#"
            <TS language="sv">
            <context>
                <message id="import-text" numerus="yes">
                    <source>Found %0 token(s)</source>
                    <translation>
                        <numerusform></numerusform>
                        <numerusform></numerusform>
                    </translation>
                </message>
                <message id="empty-finished">
                    <source>Empty</source>
                    <translation></translation>
                </message>
            </context>
            </TS>
        "#};
        let catalog = load_catalog(raw, CatalogFormat::Ts, &locale("sv")).unwrap();

        let plural = catalog.get("import-text").unwrap();
        assert!(!plural.finished);
        assert!(plural.is_plural);
        assert_eq!(plural.forms, vec![String::new(), String::new()]);

        let single = catalog.get("empty-finished").unwrap();
        assert!(!single.finished);
        assert!(!single.is_plural);
        assert_eq!(single.forms, vec![String::new()]);
    }

    #[test]
    fn test_blank_plural_with_wrong_arity_is_rejected() {
        let raw = indoc! {r#"
            <TS language="pl">
            <context>
                <message id="tokens" numerus="yes">
                    <source>%0 token(s)</source>
                    <translation type="unfinished">
                        <numerusform></numerusform>
                        <numerusform></numerusform>
                    </translation>
                </message>
            </context>
            </TS>
        "#};
        let err = load_catalog(raw, CatalogFormat::Ts, &locale("pl")).unwrap_err();
        assert!(
            matches!(
                err,
                Error::PluralArity {
                    expected: 3,
                    found: 2,
                    ..
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn test_unfinished_with_text_is_kept_but_hidden() {
        let raw = indoc! {r#"
            <TS language="pl">
            <context>
                <message id="add-title">
                    <source>Add token</source>
                    <comment>dialog</comment>
                    <extracomment>Dialog title</extracomment>
                    <translation type="unfinished">Nowy token</translation>
                </message>
            </context>
            </TS>
        "#};
        let catalog = load_catalog(raw, CatalogFormat::Ts, &locale("pl")).unwrap();
        let entry = catalog.get("add-title").unwrap();
        assert!(!entry.finished);
        assert_eq!(entry.first_form(), "Nowy token");
        assert_eq!(entry.context_note.as_deref(), Some("dialog"));
        assert_eq!(entry.extra_note.as_deref(), Some("Dialog title"));
        assert!(catalog.lookup("add-title").is_none());
    }

    #[test]
    fn test_plural_arity_checked_against_expected_locale() {
        let raw = indoc! {r#"
            <TS language="ru">
            <context>
                <message id="tokens" numerus="yes">
                    <source>%0 token(s)</source>
                    <translation>
                        <numerusform>%0 ключ</numerusform>
                        <numerusform>%0 ключа</numerusform>
                    </translation>
                </message>
            </context>
            </TS>
        "#};
        let err = load_catalog(raw, CatalogFormat::Ts, &locale("ru")).unwrap_err();
        assert!(matches!(
            err,
            Error::PluralArity {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_across_contexts() {
        let raw = indoc! {r#"
            <TS language="en">
            <context><name>A</name>
                <message id="dup"><source>One</source><translation>One</translation></message>
            </context>
            <context><name>B</name>
                <message id="dup"><source>Two</source><translation>Two</translation></message>
            </context>
            </TS>
        "#};
        let err = load_catalog(raw, CatalogFormat::Ts, &locale("en")).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { ref id, .. } if id == "dup"));
    }

    #[test]
    fn test_declared_language_mismatch() {
        let raw = r#"{ "language": "pl", "messages": [] }"#;
        let lenient = load_catalog(raw, CatalogFormat::Json, &locale("ru")).unwrap();
        assert_eq!(lenient.locale().as_str(), "ru");
        assert_eq!(lenient.declared_language(), Some("pl"));

        let strict = LoadOptions::new().with_strict_language(true);
        let err = load_catalog_with(raw, CatalogFormat::Json, &locale("ru"), &strict).unwrap_err();
        assert!(matches!(err, Error::LocaleMismatch { .. }));

        // a region on either side is not a mismatch
        assert!(load_catalog_with(raw, CatalogFormat::Json, &locale("pl-PL"), &strict).is_ok());
    }

    #[test]
    fn test_empty_id_rejected() {
        let raw = r#"{ "messages": [ { "id": "", "source": "x", "translations": ["y"] } ] }"#;
        assert!(matches!(
            load_catalog(raw, CatalogFormat::Json, &locale("en")),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_load_reader() {
        let raw = r#"{ "language": "sv", "messages": [ { "id": "a", "source": "A", "translations": ["Ä"] } ] }"#;
        let catalog = load_catalog_reader(
            std::io::Cursor::new(raw),
            CatalogFormat::Json,
            &locale("sv"),
            &LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(catalog.lookup("a").unwrap().first_form(), "Ä");
    }

    #[test]
    fn test_load_file_infers_locale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app-sv.json");
        std::fs::write(
            &path,
            r#"{ "messages": [ { "id": "a", "source": "A", "translations": ["Ä"] } ] }"#,
        )
        .unwrap();
        let catalog = load_catalog_file(&path, None, &LoadOptions::default()).unwrap();
        assert_eq!(catalog.locale().as_str(), "sv");

        let nameless = dir.path().join("messages.json");
        std::fs::write(&nameless, r#"{ "messages": [] }"#).unwrap();
        assert!(matches!(
            load_catalog_file(&nameless, None, &LoadOptions::default()),
            Err(Error::InvalidLocale(_))
        ));

        let missing = dir.path().join("missing-pl.ts");
        assert!(matches!(
            load_catalog_file(&missing, None, &LoadOptions::default()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_load_file_utf16_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app-ru.ts");
        let xml = r#"<TS language="ru"><context><message id="no"><source>No</source><translation>Нет</translation></message></context></TS>"#;
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();

        let catalog = load_catalog_file(&path, None, &LoadOptions::default()).unwrap();
        assert_eq!(catalog.lookup("no").unwrap().first_form(), "Нет");
    }
}
