mod check;
mod resolve;
mod stats;
mod view;

use std::{path::PathBuf, str::FromStr};

use clap::{ArgAction, Parser, Subcommand};
use numerus::{CatalogFormat, LoadOptions};
use tracing_subscriber::EnvFilter;

use crate::{
    check::run_check,
    resolve::{ResolveOptions, run_resolve},
    stats::print_stats,
    view::print_view,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one message the way an application would.
    Resolve {
        /// Catalog files, as `path` or `path:locale`
        #[arg(short, long = "input", num_args = 1..)]
        inputs: Vec<String>,

        /// Directory to discover catalogs in (requires --base)
        #[arg(long, requires = "base")]
        dir: Option<PathBuf>,

        /// Catalog base name inside --dir, e.g. `harbour-foilauth`
        #[arg(long)]
        base: Option<String>,

        /// Default (reference) locale used for fallbacks
        #[arg(long = "default")]
        default_locale: Option<String>,

        /// Target locale; defaults to LC_ALL / LC_MESSAGES / LANG
        #[arg(short, long)]
        locale: Option<String>,

        /// Message id
        #[arg(long)]
        id: String,

        /// Quantity used for plural selection
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Force the catalog format (ts, json)
        #[arg(long)]
        format: Option<String>,

        /// Placeholder arguments, bound to %N markers in ascending order
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },

    /// Load catalogs and report errors, unfinished entries and placeholder mismatches.
    Check {
        /// Catalog files, as `path` or `path:locale`
        #[arg(short, long = "input", num_args = 1.., required = true)]
        inputs: Vec<String>,

        /// Force the catalog format (ts, json)
        #[arg(long)]
        format: Option<String>,

        /// Treat a declared language that differs from the locale as an error
        #[arg(long)]
        strict: bool,
    },

    /// View the entries of a catalog.
    View {
        /// The catalog file, as `path` or `path:locale`
        #[arg(short, long)]
        input: String,

        /// Force the catalog format (ts, json)
        #[arg(long)]
        format: Option<String>,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// Show per-locale entry counts and completion.
    Stats {
        /// Catalog files, as `path` or `path:locale`
        #[arg(short, long = "input", num_args = 1.., required = true)]
        inputs: Vec<String>,

        /// Force the catalog format (ts, json)
        #[arg(long)]
        format: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_options(format: Option<&str>, strict: bool) -> Result<LoadOptions, String> {
    let format = format
        .map(CatalogFormat::from_str)
        .transpose()
        .map_err(|e| e.to_string())?;
    Ok(LoadOptions::new()
        .with_format(format)
        .with_strict_language(strict))
}

fn run(args: Args) -> Result<(), String> {
    match args.commands {
        Commands::Resolve {
            inputs,
            dir,
            base,
            default_locale,
            locale,
            id,
            count,
            format,
            args,
        } => {
            let options = load_options(format.as_deref(), false)?;
            run_resolve(ResolveOptions {
                inputs,
                dir,
                base,
                default_locale,
                locale,
                id,
                count,
                args,
                load_options: options,
            })
        }
        Commands::Check {
            inputs,
            format,
            strict,
        } => {
            let options = load_options(format.as_deref(), strict)?;
            run_check(&inputs, &options)
        }
        Commands::View {
            input,
            format,
            full,
        } => {
            let options = load_options(format.as_deref(), false)?;
            print_view(&input, &options, full)
        }
        Commands::Stats {
            inputs,
            format,
            json,
        } => {
            let options = load_options(format.as_deref(), false)?;
            print_stats(&inputs, &options, json)
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
