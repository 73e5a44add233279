//! The immutable set of catalogs a resolver reads from.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    error::Error,
    formats::CatalogFormat,
    loader::{load_catalog_file, load_reference_file},
    locale::Locale,
    options::LoadOptions,
};

/// One complete, never-mutated generation of catalogs.
///
/// A reload builds a whole new snapshot; readers holding the old one keep a
/// consistent view until they drop it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    catalogs: HashMap<Locale, Arc<Catalog>>,
    default_locale: Locale,
}

impl Snapshot {
    /// Collects catalogs by locale. When two catalogs share a locale the later one wins.
    pub fn new<I, C>(catalogs: I, default_locale: Locale) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Arc<Catalog>>,
    {
        let mut map = HashMap::new();
        for catalog in catalogs {
            let catalog: Arc<Catalog> = catalog.into();
            let locale = catalog.locale().clone();
            if map.insert(locale.clone(), catalog).is_some() {
                warn!(%locale, "more than one catalog for locale, keeping the last one");
            }
        }
        if !map.contains_key(&default_locale) {
            warn!(%default_locale, "no catalog for the default locale");
        }
        Self {
            catalogs: map,
            default_locale,
        }
    }

    /// A snapshot without catalogs. Every resolution yields the message id.
    pub fn empty(default_locale: Locale) -> Self {
        Self {
            catalogs: HashMap::new(),
            default_locale,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// The catalog registered under exactly this locale.
    pub fn catalog(&self, locale: &Locale) -> Option<&Arc<Catalog>> {
        self.catalogs.get(locale)
    }

    /// The catalog for `locale`, or for its bare language (`pl-PL` falls back to `pl`).
    pub fn find_catalog(&self, locale: &Locale) -> Option<&Arc<Catalog>> {
        self.catalogs.get(locale).or_else(|| {
            locale
                .language_only()
                .and_then(|language| self.catalogs.get(&language))
        })
    }

    /// The reference catalog whose sources back every fallback.
    pub fn default_catalog(&self) -> Option<&Arc<Catalog>> {
        self.find_catalog(&self.default_locale)
    }

    /// Whether a catalog would be found for `locale`.
    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.find_catalog(locale).is_some()
    }

    /// Registered locales, sorted.
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.catalogs.keys().collect();
        locales.sort();
        locales
    }

    /// Catalogs sorted by locale.
    pub fn catalogs(&self) -> Vec<&Arc<Catalog>> {
        let mut catalogs: Vec<&Arc<Catalog>> = self.catalogs.values().collect();
        catalogs.sort_by(|a, b| a.locale().cmp(b.locale()));
        catalogs
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Loads every catalog named after `base_name` in `dir`.
    ///
    /// `<base>.ts` is the reference catalog; its locale is the language it
    /// declares, and a reference without one is recorded as a failure. `<base>-<locale>.ts` and `<base>_<locale>.ts` are translations.
    /// `.json` files are picked up the same way unless `options.format`
    /// restricts the extension. A file that fails to load is recorded in
    /// [`DirLoad::failures`] and the others still load. Only an unreadable
    /// directory is an error.
    pub fn load_dir<P: AsRef<Path>>(
        dir: P,
        base_name: &str,
        options: &LoadOptions,
    ) -> Result<DirLoad, Error> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut result = DirLoad::default();
        for path in paths {
            let Some(kind) = classify(&path, base_name, options) else {
                continue;
            };
            let is_reference = matches!(kind, CatalogFile::Reference);
            let loaded = match kind {
                CatalogFile::Reference => load_reference_file(&path, options),
                CatalogFile::Translation(Ok(locale)) => {
                    load_catalog_file(&path, Some(&locale), options)
                }
                CatalogFile::Translation(Err(err)) => Err(err),
            };
            match loaded {
                Ok(catalog) => {
                    debug!(path = %path.display(), locale = %catalog.locale(), "discovered catalog");
                    if is_reference {
                        result.reference = Some(catalog.locale().clone());
                    }
                    result.catalogs.push(catalog);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to load catalog");
                    result.failures.push((path, err));
                }
            }
        }
        Ok(result)
    }
}

enum CatalogFile {
    Reference,
    Translation(Result<Locale, Error>),
}

fn classify(path: &Path, base_name: &str, options: &LoadOptions) -> Option<CatalogFile> {
    let extension = path.extension()?.to_str()?;
    let format = match options.format {
        Some(format) if format.extension().eq_ignore_ascii_case(extension) => format,
        Some(_) => return None,
        None => CatalogFormat::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))?,
    };
    let stem = path.file_stem()?.to_str()?;
    if stem == base_name {
        return Some(CatalogFile::Reference);
    }
    let tag = stem
        .strip_prefix(base_name)?
        .strip_prefix(['-', '_'])?;
    debug!(path = %path.display(), %format, tag, "catalog file");
    Some(CatalogFile::Translation(Locale::parse(tag)))
}

/// The outcome of [`Snapshot::load_dir`].
#[derive(Debug, Default)]
pub struct DirLoad {
    pub catalogs: Vec<Catalog>,
    pub failures: Vec<(PathBuf, Error)>,
    /// Locale of the reference catalog, if one was found and loaded.
    pub reference: Option<Locale>,
}

impl DirLoad {
    /// Whether every discovered file loaded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Builds a snapshot from the loaded catalogs. The default locale is
    /// `default_locale`, else the reference catalog's locale.
    pub fn into_snapshot(self, default_locale: Option<Locale>) -> Result<Snapshot, Error> {
        let default_locale = default_locale.or(self.reference).ok_or_else(|| {
            Error::InvalidLocale("no default locale given and no reference catalog found".into())
        })?;
        Ok(Snapshot::new(self.catalogs, default_locale))
    }
}
