//! Message resolution with plural selection, placeholder substitution and
//! locale fallback.
//!
//! A [`Resolver`] owns the current [`Snapshot`] behind an [`ArcSwap`]. Each
//! call to [`Resolver::resolve`] loads the pointer once, so a concurrent
//! [`Resolver::reload`] is seen either not at all or in full.
//!
//! Resolution never fails. The fallback order is:
//!
//! 1. the finished translation in the catalog for the requested locale (or
//!    its bare language),
//! 2. the source text of the message in the default catalog,
//! 3. the source text of the message in the requested catalog,
//! 4. the message id itself.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    locale::Locale,
    placeholder::substitute_with_report,
    plural_rules::form_index,
    snapshot::Snapshot,
    types::{MessageEntry, MessageId},
};

/// Everything needed to resolve one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub id: MessageId,
    pub locale: Locale,
    pub quantity: Option<i64>,
    pub args: Vec<String>,
}

impl ResolutionRequest {
    pub fn new(id: impl Into<MessageId>, locale: Locale) -> Self {
        Self {
            id: id.into(),
            locale,
            quantity: None,
            args: Vec::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Resolves messages against an atomically replaceable set of catalogs.
///
/// `Resolver` is `Send + Sync`; share it by reference or inside an `Arc`.
#[derive(Debug)]
pub struct Resolver {
    current: ArcSwap<Snapshot>,
}

/// Builds a resolver over `catalogs` with `default_locale` as the reference
/// locale for fallbacks.
///
/// # Example
/// ```rust
/// use numerus::{build_resolver, Catalog, Locale, MessageEntry};
/// let en = Locale::parse("en")?;
/// let sv = Locale::parse("sv")?;
/// let catalogs = vec![
///     Catalog::from_entries(en.clone(), vec![
///         MessageEntry::plural("tokens", "%0 token(s)", ["%0 token", "%0 tokens"]),
///     ])?,
///     Catalog::from_entries(sv.clone(), vec![
///         MessageEntry::plural("tokens", "%0 token(s)", ["%0 nyckel", "%0 nycklar"]),
///     ])?,
/// ];
/// let resolver = build_resolver(catalogs, en);
/// assert_eq!(resolver.resolve("tokens", &sv, Some(3), &["3"]), "3 nycklar");
/// assert_eq!(resolver.resolve("missing", &sv, None, &[] as &[&str]), "missing");
/// Ok::<(), numerus::Error>(())
/// ```
pub fn build_resolver<I, C>(catalogs: I, default_locale: Locale) -> Resolver
where
    I: IntoIterator<Item = C>,
    C: Into<Arc<Catalog>>,
{
    Resolver::new(catalogs, default_locale)
}

impl Resolver {
    pub fn new<I, C>(catalogs: I, default_locale: Locale) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Arc<Catalog>>,
    {
        Self::from_snapshot(Snapshot::new(catalogs, default_locale))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Replaces every catalog at once, keeping the default locale.
    ///
    /// The new snapshot is built before it is published, so readers never
    /// observe a partially loaded set.
    pub fn reload<I, C>(&self, catalogs: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Arc<Catalog>>,
    {
        let default_locale = self.current.load().default_locale().clone();
        self.publish(Snapshot::new(catalogs, default_locale));
    }

    /// Publishes a prepared snapshot, which may carry a new default locale.
    pub fn publish(&self, snapshot: Snapshot) {
        debug!(
            catalogs = snapshot.len(),
            default_locale = %snapshot.default_locale(),
            "publishing catalog snapshot"
        );
        self.current.store(Arc::new(snapshot));
    }

    /// The snapshot in use right now.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn default_locale(&self) -> Locale {
        self.current.load().default_locale().clone()
    }

    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.current.load().has_locale(locale)
    }

    pub fn locales(&self) -> Vec<Locale> {
        self.current.load().locales().into_iter().cloned().collect()
    }

    /// Resolves `id` for `locale`.
    ///
    /// For plural messages `quantity` selects the form through the catalog
    /// locale's plural rule. Without a quantity, or with a negative one, the
    /// first form is used. `args` fill `%N` markers.
    pub fn resolve<S: AsRef<str>>(
        &self,
        id: &str,
        locale: &Locale,
        quantity: Option<i64>,
        args: &[S],
    ) -> String {
        let snapshot = self.current.load();
        let template = select_template(&snapshot, id, locale, quantity);
        let substitution = substitute_with_report(template, args);
        if !substitution.is_complete() {
            debug!(
                id,
                %locale,
                unmatched = ?substitution.unmatched,
                "placeholders left without arguments"
            );
        }
        substitution.text
    }

    pub fn resolve_request(&self, request: &ResolutionRequest) -> String {
        self.resolve(&request.id, &request.locale, request.quantity, &request.args)
    }

    /// Resolves a message that takes neither a quantity nor arguments.
    pub fn translate(&self, id: &str, locale: &Locale) -> String {
        self.resolve::<&str>(id, locale, None, &[])
    }
}

fn select_template<'a>(
    snapshot: &'a Snapshot,
    id: &'a str,
    locale: &Locale,
    quantity: Option<i64>,
) -> &'a str {
    let catalog = snapshot.find_catalog(locale);
    let local = catalog.and_then(|catalog| catalog.get(id));

    match (catalog, local) {
        (None, _) => warn!(%locale, id, "no catalog for locale"),
        (Some(_), None) => warn!(%locale, id, "message missing from catalog"),
        (Some(catalog), Some(entry)) if entry.finished => {
            let form = select_form(catalog, entry, quantity);
            if !form.is_empty() {
                return form;
            }
            debug!(%locale, id, "selected form is empty");
        }
        (Some(_), Some(_)) => debug!(%locale, id, "message unfinished"),
    }

    let default_source = snapshot
        .default_catalog()
        .and_then(|catalog| catalog.get(id))
        .map(|entry| entry.source.as_str());
    let local_source = local.map(|entry| entry.source.as_str());
    if let Some(source) = default_source
        .filter(|source| !source.is_empty())
        .or_else(|| local_source.filter(|source| !source.is_empty()))
    {
        return source;
    }

    warn!(%locale, id, "message unknown, showing its id");
    id
}

fn select_form<'a>(catalog: &Catalog, entry: &'a MessageEntry, quantity: Option<i64>) -> &'a str {
    if !entry.is_plural {
        return entry.first_form();
    }
    let Some(quantity) = quantity else {
        debug!(id = %entry.id, "plural message without quantity, using the first form");
        return entry.first_form();
    };
    match form_index(catalog.locale(), quantity) {
        Ok(index) => entry.form(index).unwrap_or_else(|| entry.first_form()),
        Err(err) => {
            warn!(id = %entry.id, error = %err, "using the first form");
            entry.first_form()
        }
    }
}
