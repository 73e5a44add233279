use numerus::{Catalog, LoadOptions, placeholder::placeholder_signature};
use numerus_cli::{load_input, parse_input_spec};

/// Placeholder sets of every finished form that differ from the source's.
fn placeholder_mismatches(catalog: &Catalog) -> Vec<String> {
    let mut out = Vec::new();
    for entry in catalog.iter().filter(|e| e.finished) {
        let expected = placeholder_signature(&entry.source);
        for (index, form) in entry.forms.iter().enumerate() {
            let found = placeholder_signature(form);
            // a singular plural form may spell out the number ("a new token")
            if found == expected || (entry.is_plural && found.is_subset(&expected)) {
                continue;
            }
            out.push(format!(
                "{} [form {}]: placeholders {:?}, source has {:?}",
                entry.id, index, found, expected
            ));
        }
    }
    out
}

/// Loads each input and reports problems. Fails if any catalog failed to load.
pub fn run_check(inputs: &[String], options: &LoadOptions) -> Result<(), String> {
    let mut failed = 0usize;

    for input in inputs {
        let catalog = match parse_input_spec(input).and_then(|spec| load_input(&spec, options)) {
            Ok(catalog) => catalog,
            Err(e) => {
                println!("✗ {}", e);
                failed += 1;
                continue;
            }
        };

        let unfinished: Vec<&str> = catalog
            .iter()
            .filter(|e| !e.finished)
            .map(|e| e.id.as_str())
            .collect();
        let mismatches = placeholder_mismatches(&catalog);

        println!(
            "✓ {} [{}]: {} messages, {} unfinished",
            input,
            catalog.locale(),
            catalog.len(),
            unfinished.len()
        );
        for id in &unfinished {
            println!("  - unfinished: {}", id);
        }
        for mismatch in &mismatches {
            println!("  ! {}", mismatch);
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} catalog(s) failed to load", failed, inputs.len()));
    }
    Ok(())
}
