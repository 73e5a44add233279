use numerus::{LoadOptions, MessageEntry};
use numerus_cli::{load_input, parse_input_spec};
use unicode_width::UnicodeWidthChar;

const MAX_WIDTH: usize = 50;

/// Cuts `value` to at most [`MAX_WIDTH`] terminal columns.
fn truncate(value: &str) -> String {
    let mut width = 0;
    for (index, ch) in value.char_indices() {
        width += ch.width().unwrap_or(0);
        if width > MAX_WIDTH {
            return format!("{}...", &value[..index]);
        }
    }
    value.to_string()
}

fn display(value: &str, full: bool) -> String {
    if full { value.to_string() } else { truncate(value) }
}

fn print_entry(number: usize, entry: &MessageEntry, categories: &[numerus::PluralCategory], full: bool) {
    println!("\n  Entry {}: {}", number, entry.id);
    println!(
        "    Status: {}",
        if entry.finished { "finished" } else { "unfinished" }
    );
    if let Some(note) = &entry.context_note {
        println!("    Note: {}", note);
    }
    println!("    Source: {}", display(&entry.source, full));

    if entry.is_plural {
        for (category, form) in categories.iter().zip(&entry.forms) {
            println!("      {}: {}", category, display(form, full));
        }
    } else {
        println!("    Value: {}", display(entry.first_form(), full));
    }
}

/// Print every entry of one catalog.
pub fn print_view(input: &str, options: &LoadOptions, full: bool) -> Result<(), String> {
    let spec = parse_input_spec(input)?;
    let catalog = load_input(&spec, options)?;
    let categories = catalog.plural_rule().categories();

    println!("=== Catalog ===");
    println!("Locale: {}", catalog.locale());
    if let Some(language) = catalog.declared_language() {
        println!("Declared language: {}", language);
    }
    println!("Entries: {}", catalog.len());

    for (i, entry) in catalog.iter().enumerate() {
        print_entry(i + 1, entry, categories, full);
    }
    Ok(())
}
