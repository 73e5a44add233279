use std::path::PathBuf;

use numerus::{Catalog, LoadOptions, Locale, Resolver, Snapshot};
use numerus_cli::load_inputs;
use tracing::debug;

pub struct ResolveOptions {
    pub inputs: Vec<String>,
    pub dir: Option<PathBuf>,
    pub base: Option<String>,
    pub default_locale: Option<String>,
    pub locale: Option<String>,
    pub id: String,
    pub count: Option<i64>,
    pub args: Vec<String>,
    pub load_options: LoadOptions,
}

/// Locale from the POSIX environment, in the order C libraries consult it.
fn locale_from_env() -> Option<Locale> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| Locale::parse(&value).ok())
}

fn parse_locale(tag: &str) -> Result<Locale, String> {
    Locale::parse(tag).map_err(|e| e.to_string())
}

pub fn run_resolve(opts: ResolveOptions) -> Result<(), String> {
    let mut catalogs: Vec<Catalog> = Vec::new();
    let mut reference = None;

    if let (Some(dir), Some(base)) = (&opts.dir, &opts.base) {
        let loaded = Snapshot::load_dir(dir, base, &opts.load_options)
            .map_err(|e| format!("{}: {}", dir.display(), e))?;
        for (path, err) in &loaded.failures {
            eprintln!("Warning: skipping {}: {}", path.display(), err);
        }
        reference = loaded.reference;
        catalogs.extend(loaded.catalogs);
    }
    catalogs.extend(load_inputs(&opts.inputs, &opts.load_options)?);

    if catalogs.is_empty() {
        return Err("no catalogs loaded, pass -i or --dir/--base".to_string());
    }

    let default_locale = match opts.default_locale.as_deref() {
        Some(tag) => parse_locale(tag)?,
        None => reference
            .or_else(|| catalogs.first().map(|c| c.locale().clone()))
            .ok_or("no default locale")?,
    };
    let locale = match opts.locale.as_deref() {
        Some(tag) => parse_locale(tag)?,
        None => locale_from_env().unwrap_or_else(|| default_locale.clone()),
    };
    debug!(%default_locale, %locale, catalogs = catalogs.len(), "resolving");

    let resolver = Resolver::new(catalogs, default_locale);
    println!(
        "{}",
        resolver.resolve(&opts.id, &locale, opts.count, &opts.args)
    );
    Ok(())
}
