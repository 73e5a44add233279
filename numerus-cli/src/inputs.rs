//! `-i path[:locale]` arguments and loading them.

use std::path::PathBuf;

use numerus::{Catalog, LoadOptions, Locale, load_catalog_file};

/// One catalog file named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub path: PathBuf,
    /// Explicit locale; inferred from the file when absent.
    pub locale: Option<Locale>,
}

/// Parses `path` or `path:locale`.
///
/// A suffix containing a path separator belongs to the path (`C:\catalogs\app.ts`).
pub fn parse_input_spec(input: &str) -> Result<InputSpec, String> {
    let split = input
        .rsplit_once(':')
        .filter(|(path, tag)| !path.is_empty() && !tag.is_empty() && !tag.contains(['/', '\\']));
    if let Some((path, tag)) = split {
        let locale =
            Locale::parse(tag).map_err(|e| format!("invalid locale in input `{}`: {}", input, e))?;
        return Ok(InputSpec {
            path: PathBuf::from(path),
            locale: Some(locale),
        });
    }
    if input.is_empty() {
        return Err("empty input path".to_string());
    }
    Ok(InputSpec {
        path: PathBuf::from(input),
        locale: None,
    })
}

/// Loads one input.
pub fn load_input(spec: &InputSpec, options: &LoadOptions) -> Result<Catalog, String> {
    load_catalog_file(&spec.path, spec.locale.as_ref(), options)
        .map_err(|e| format!("{}: {}", spec.path.display(), e))
}

/// Parses and loads every input, stopping at the first failure.
pub fn load_inputs(inputs: &[String], options: &LoadOptions) -> Result<Vec<Catalog>, String> {
    inputs
        .iter()
        .map(|input| parse_input_spec(input).and_then(|spec| load_input(&spec, options)))
        .collect()
}
