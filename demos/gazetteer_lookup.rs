//! Direct gazetteer lookups, including ambiguous names and error cases.
//!
//! ```bash
//! cargo run --example gazetteer_lookup
//! ```

use phgeo_rs::{GeoError, Gazetteer, Result};

fn main() -> Result<()> {
    println!("=== phgeo gazetteer demo ===\n");

    // Loading errors are typed.
    match Gazetteer::load_from_path("does/not/exist.json") {
        Ok(_) => println!("unexpectedly loaded"),
        Err(GeoError::NotFound(msg)) => println!("missing dataset: {msg}"),
        Err(e) => return Err(e),
    }
    println!();

    let g = Gazetteer::load()?;

    println!("--- Ambiguous barangay ---");
    println!("'San Roque' in {} cities", g.barangays_named("San Roque").len());
    println!("  no hint:        {:?}", g.find_barangay("San Roque", None, None).map(|u| u.city()));
    println!(
        "  city Marikina:  {:?}",
        g.find_barangay("San Roque", Some("Marikina"), None).map(|u| u.city())
    );
    println!();

    println!("--- Ambiguous city ---");
    for hint in [None, Some("La Union"), Some("Pampanga")] {
        let found = g.find_city("San Fernando", hint).and_then(|u| u.province());
        println!("  San Fernando, hint {hint:?}: {found:?}");
    }
    println!("  Rizal, no hint: {:?}", g.find_city("Rizal", None).map(|u| u.province()));
    println!();

    println!("--- Aliases ---");
    for name in ["QC", "Montalban", "North Caloocan"] {
        match g.find_city(name, None) {
            Some(u) => println!("  {name} -> {} ({})", u.city().unwrap_or_default(), u.region()),
            None => println!("  {name} -> not found"),
        }
    }
    if let Some(r) = g.find_region("CALABARZON") {
        println!("  CALABARZON -> {}", r.region());
    }
    Ok(())
}
