#![forbid(unsafe_code)]
//! Runtime for per-locale message catalogs with plural forms.
//!
//! Loads Qt Linguist `.ts` (and JSON) catalogs, selects the right plural form
//! for a locale and quantity, substitutes `%N` placeholders and falls back
//! gracefully when a translation is missing or unfinished.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use numerus::{LoadOptions, Locale, Snapshot, Resolver};
//!
//! let loaded = Snapshot::load_dir("translations", "harbour-foilauth", &LoadOptions::default())?;
//! let resolver = Resolver::from_snapshot(loaded.into_snapshot(None)?);
//!
//! let pl = Locale::parse("pl_PL.UTF-8")?;
//! let label = resolver.resolve("foilauth-generate-label-minimum_length", &pl, Some(5), &["5"]);
//! println!("{label}");
//! # Ok::<(), numerus::Error>(())
//! ```
//!
//! # Fallback
//!
//! Resolution never fails: an unfinished or missing translation falls back to
//! the source text of the default catalog, then to the message id.
//!
//! # Reloading
//!
//! [`Resolver::reload`] swaps in a complete new set of catalogs atomically;
//! concurrent readers see either the old or the new set, never a mix.

pub mod catalog;
pub mod error;
pub mod formats;
pub mod loader;
pub mod locale;
pub mod options;
pub mod placeholder;
pub mod plural_rules;
pub mod resolver;
pub mod snapshot;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::Catalog,
    error::Error,
    formats::CatalogFormat,
    loader::{
        infer_locale_from_path, load_catalog, load_catalog_file, load_catalog_with,
        load_reference_file,
    },
    locale::Locale,
    options::LoadOptions,
    placeholder::{Substitution, substitute},
    plural_rules::{PluralRule, category_count, category_for},
    resolver::{ResolutionRequest, Resolver, build_resolver},
    snapshot::{DirLoad, Snapshot},
    types::{MessageEntry, MessageId, PluralCategory},
};
