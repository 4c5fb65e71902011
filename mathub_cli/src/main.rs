//! # Material Hub CLI
//!
//! Command-line front end for the material card engine.
//!
//! ```bash
//! mathub list
//! mathub fields mat159_cscm --all
//! mathub generate mat159_cscm --set fc_mpa=40 --set dmax_mm=19 --out-dir decks
//! mathub generate mat084_winfrith --inputs c30.json --stdout
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`,
//! `-v` for `debug`), so `--stdout` and `--json` output stays clean.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use mathub_core::fields::FieldKind;
use mathub_core::format::plain_decimal;
use mathub_core::{
    load_inputs, save_deck, CardError, CardResult, FieldSpec, GeneratorDefinition,
    GeneratorRegistry, RawInputs, RawValue,
};

#[derive(Parser, Debug)]
#[command(name = "mathub", version)]
#[command(about = "Generate LS-DYNA material cards from physical inputs")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available generators
    List {
        /// Print generator summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the input fields of a generator
    Fields {
        /// Generator key, e.g. mat159_cscm
        key: String,
        /// Include advanced fields
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Generate a material deck
    Generate {
        /// Generator key, e.g. mat159_cscm
        key: String,
        /// JSON file of field values
        #[arg(long, value_name = "FILE")]
        inputs: Option<PathBuf>,
        /// Override one field; an empty value restores the default
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
        /// Directory for the generated .k file
        #[arg(long, env = "MATHUB_OUT_DIR", default_value = ".")]
        out_dir: PathBuf,
        /// Print the deck instead of writing a file
        #[arg(long, conflicts_with = "json")]
        stdout: bool,
        /// Print the full result (inputs, derived values, text) as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `key=value` pair for `--set`
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field key in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Preset values overlaid with `--set` assignments
fn merge_inputs(mut raw: RawInputs, assignments: &[(String, String)]) -> RawInputs {
    for (key, value) in assignments {
        let value = if value.is_empty() {
            RawValue::Blank
        } else {
            RawValue::Text(value.clone())
        };
        raw.insert(key.clone(), value);
    }
    raw
}

fn lookup<'a>(registry: &'a GeneratorRegistry, key: &str) -> CardResult<&'a GeneratorDefinition> {
    registry.get(key).ok_or_else(|| CardError::unknown_generator(key))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn format_field(field: &FieldSpec) -> String {
    let default = match field.kind {
        FieldKind::Integer => plain_decimal(field.default, 0),
        FieldKind::Number => field.default.to_string(),
    };
    let range = match (field.min, field.max) {
        (Some(min), Some(max)) => format!("[{}, {}]", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => String::new(),
    };
    format!(
        "{:<16} {:<40} {:<10} {:>10}  {}",
        field.key, field.label, field.unit, default, range
    )
}

fn run(cli: Cli, registry: &GeneratorRegistry) -> CardResult<()> {
    match cli.command {
        Command::List { json } => {
            if json {
                println!("{}", to_json(&registry.summaries()));
            } else {
                for def in registry.definitions() {
                    println!("{:<36} {:<34} {}", def.key, def.name, def.keyword);
                }
            }
        }

        Command::Fields { key, all, json } => {
            let def = lookup(registry, &key)?;
            let fields: Vec<&FieldSpec> = def.visible_fields(all).collect();
            if json {
                println!("{}", to_json(&fields));
            } else {
                println!("{} ({})", def.name, def.keyword);
                for field in fields {
                    println!("  {}", format_field(field));
                }
            }
        }

        Command::Generate {
            key,
            inputs,
            set,
            out_dir,
            stdout,
            json,
        } => {
            let def = lookup(registry, &key)?;
            let preset = match &inputs {
                Some(path) => load_inputs(path)?,
                None => RawInputs::new(),
            };
            let raw = merge_inputs(preset, &set);
            for name in raw.keys() {
                if def.field(name).is_none() {
                    warn!("'{}' is not an input of {}; ignored", name, def.key);
                }
            }

            let result = def.run(&raw)?;
            if json {
                println!("{}", to_json(&result));
            } else if stdout {
                print!("{}", result.text);
            } else {
                let path = save_deck(&result, &out_dir)?;
                info!("Wrote {}", path.display());
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = GeneratorRegistry::standard().and_then(|registry| run(cli, &registry));
    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("{}", to_json(&e));
        process::exit(1);
    }
}
