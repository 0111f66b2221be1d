//! phgeo: command-line interface for phgeo-core
//!
//! Resolves Philippine place mentions in free text to
//! region / province / city / barangay, and lets you inspect the index the
//! resolver runs on.
//!
//! Usage examples
//! --------------
//!
//! - Resolve a post
//!   $ phgeo resolve "Brgy. 171, North Caloocan."
//!
//! - Resolve one post per stdin line, as JSON
//!   $ cat posts.txt | phgeo --json resolve
//!
//! - See why a text resolved the way it did
//!   $ phgeo explain "Consolacion, Cebu"
//!
//! - Lookups against the index
//!   $ phgeo barangay "San Roque" --city Marikina
//!   $ phgeo city "San Fernando" --province "La Union"
//!   $ phgeo province Rizal
//!
//! - Save a binary snapshot for faster startup
//!   $ phgeo snapshot ph.bin.gz
//!   $ phgeo --input ph.bin.gz resolve "taga Bay, Laguna"
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `phgeo=info`).
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use phgeo_core::{AdminUnit, Gazetteer, Resolver, ResolverConfig};
use serde::Serialize;
use std::io::BufRead;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("phgeo=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    // Determine input file (default JSON inside phgeo-core)
    let input_path = args.input.unwrap_or_else(|| {
        let dir = Gazetteer::default_data_dir();
        let filename = Gazetteer::default_dataset_filename();
        dir.join(filename).to_string_lossy().to_string()
    });

    let gazetteer = Gazetteer::load_from_path(&input_path)
        .with_context(|| format!("loading dataset {input_path}"))?;
    let config = load_config(args.config.as_deref())?;
    tracing::debug!(input = %input_path, ?config, "resolver ready");
    let resolver = Resolver::with_config(&gazetteer, config);
    let json = args.json;

    match args.command {
        Commands::Resolve { texts } => {
            if texts.is_empty() {
                for line in std::io::stdin().lock().lines() {
                    let line = line?;
                    if !line.trim().is_empty() {
                        print_resolved(&resolver, &line, json)?;
                    }
                }
            } else {
                for text in &texts {
                    print_resolved(&resolver, text, json)?;
                }
            }
        }

        Commands::Candidates { text } => {
            let candidates = resolver.candidates(&text);
            if json {
                print_json(&candidates)?;
            } else if candidates.is_empty() {
                println!("No candidates in: {text}");
            } else {
                for c in candidates {
                    match &c.context {
                        Some(ctx) => println!("{:<9} {}  [{}]", c.kind, c.text, ctx),
                        None => println!("{:<9} {}", c.kind, c.text),
                    }
                }
            }
        }

        Commands::Explain { text } => {
            let interpretations = resolver.explain(&text);
            if json {
                print_json(&interpretations)?;
            } else if interpretations.is_empty() {
                println!("No interpretations for: {text}");
            } else {
                for i in &interpretations {
                    println!("{:.3}  {:<8} {:?} -> {}", i.score, i.level, i.span, path(&i.unit));
                }
                match resolver.resolve_text(&text) {
                    Some(m) => println!("=> {m}"),
                    None => println!("=> below threshold"),
                }
            }
        }

        Commands::Stats => {
            let stats = gazetteer.stats();
            if json {
                print_json(&stats)?;
            } else {
                println!("Gazetteer statistics:");
                println!("  Regions: {}", stats.regions);
                println!("  Provinces: {}", stats.provinces);
                println!("  Cities/Municipalities: {}", stats.cities);
                println!("  Barangays: {}", stats.barangays);
                println!("  Ambiguous city names: {}", stats.ambiguous_cities);
                println!("  Ambiguous barangay names: {}", stats.ambiguous_barangays);
            }
        }

        Commands::Barangay { name, city, province } => {
            let found = gazetteer.find_barangay(&name, city.as_deref(), province.as_deref());
            print_lookup(found, &name, json, || {
                let n = gazetteer.barangays_named(&name).len();
                (n > 1).then(|| format!("{n} barangays share this name; pass --city or --province"))
            })?;
        }

        Commands::City { name, province } => {
            let found = gazetteer.find_city(&name, province.as_deref());
            print_lookup(found, &name, json, || {
                let n = gazetteer.cities_named(&name).len();
                (n > 1).then(|| format!("{n} cities share this name; pass --province"))
            })?;
        }

        Commands::Province { name } => {
            let found = gazetteer.find_province(&name);
            print_lookup(found, &name, json, || None)?;
        }

        Commands::Snapshot { out } => {
            gazetteer
                .save_snapshot(&out)
                .with_context(|| format!("writing snapshot {out}"))?;
            println!("Snapshot written to {out}");
        }
    }

    Ok(())
}

#[cfg(feature = "json")]
fn load_config(path: Option<&str>) -> anyhow::Result<ResolverConfig> {
    match path {
        Some(p) => ResolverConfig::from_path(p).with_context(|| format!("loading config {p}")),
        None => Ok(ResolverConfig::default()),
    }
}

#[cfg(not(feature = "json"))]
fn load_config(path: Option<&str>) -> anyhow::Result<ResolverConfig> {
    match path {
        Some(_) => anyhow::bail!("--config needs the 'json' feature"),
        None => Ok(ResolverConfig::default()),
    }
}

fn print_resolved(resolver: &Resolver<'_>, text: &str, json: bool) -> anyhow::Result<()> {
    let m = resolver.resolve_text(text);
    if json {
        #[derive(Serialize)]
        struct Line<'a> {
            text: &'a str,
            location: Option<&'a phgeo_core::LocationMatch>,
        }
        println!("{}", serde_json::to_string(&Line { text, location: m.as_ref() })?);
    } else {
        match m {
            Some(m) => println!("{m}"),
            None => println!("No location found in: {text}"),
        }
    }
    Ok(())
}

fn print_lookup(
    found: Option<&AdminUnit>,
    name: &str,
    json: bool,
    why_missing: impl FnOnce() -> Option<String>,
) -> anyhow::Result<()> {
    if json {
        return print_json(&found);
    }
    match found {
        Some(unit) => println!("{} ({})", path(unit), unit.level()),
        None => match why_missing() {
            Some(reason) => eprintln!("{name}: {reason}"),
            None => eprintln!("No match for: {name}"),
        },
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// "Barangay, City, Province, Region" with absent levels left out.
fn path(unit: &AdminUnit) -> String {
    [unit.barangay(), unit.city(), unit.province(), Some(unit.region())]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}
