use numerus::{Catalog, LoadOptions};
use numerus_cli::load_inputs;
use serde_json::json;
use std::collections::BTreeSet;

struct CatalogStats {
    total: usize,
    finished: usize,
    plural: usize,
    percent: f64,
}

fn collect(catalog: &Catalog) -> CatalogStats {
    CatalogStats {
        total: catalog.len(),
        finished: catalog.finished_count(),
        plural: catalog.iter().filter(|e| e.is_plural).count(),
        percent: catalog.completion_percent(),
    }
}

pub fn print_stats(inputs: &[String], options: &LoadOptions, json_output: bool) -> Result<(), String> {
    let catalogs = load_inputs(inputs, options)?;
    let unique_ids = catalogs
        .iter()
        .flat_map(|c| c.iter().map(|e| e.id.as_str()))
        .collect::<BTreeSet<_>>()
        .len();

    if json_output {
        let per_locale: Vec<_> = catalogs
            .iter()
            .map(|catalog| {
                let stats = collect(catalog);
                json!({
                    "locale": catalog.locale().as_str(),
                    "total": stats.total,
                    "finished": stats.finished,
                    "unfinished": stats.total - stats.finished,
                    "plural": stats.plural,
                    "completion_percent": (stats.percent * 100.0).round() / 100.0,
                })
            })
            .collect();
        let body = json!({
            "summary": {
                "catalogs": catalogs.len(),
                "unique_ids": unique_ids,
            },
            "locales": per_locale,
        });
        let text = serde_json::to_string_pretty(&body).map_err(|e| e.to_string())?;
        println!("{}", text);
        return Ok(());
    }

    println!("=== Stats ===");
    println!("Catalogs: {}", catalogs.len());
    println!("Unique ids: {}", unique_ids);

    for catalog in &catalogs {
        let stats = collect(catalog);
        println!("\nLocale: {}", catalog.locale());
        println!("  Total: {}", stats.total);
        println!("  Finished: {}", stats.finished);
        println!("  Unfinished: {}", stats.total - stats.finished);
        println!("  Plural: {}", stats.plural);
        println!("  Completion: {:.2}%", stats.percent);
    }
    Ok(())
}
