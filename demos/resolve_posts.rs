//! Resolve a handful of posts and show what the resolver saw.
//!
//! ```bash
//! cargo run --example resolve_posts
//! ```

use phgeo_rs::{Gazetteer, Resolver, Result};

const POSTS: &[&str] = &[
    "Brgy. 171, North Caloocan.",
    "Consolacion, Cebu",
    "Same here",
    "sarado AF malolos",
    "Taga Davao City ako",
    "Montalban Rizal",
    "baha sa San Roque, Marikina",
    "Location: Pitogo, Consolacion",
];

fn main() -> Result<()> {
    println!("=== phgeo resolver demo ===\n");

    let gazetteer = Gazetteer::load()?;
    let stats = gazetteer.stats();
    println!(
        "Index: {} regions, {} provinces, {} cities, {} barangays\n",
        stats.regions, stats.provinces, stats.cities, stats.barangays
    );

    let resolver = Resolver::new(gazetteer);
    for post in POSTS {
        println!("> {post}");
        let candidates = resolver.candidates(post);
        if !candidates.is_empty() {
            let shown: Vec<String> = candidates
                .iter()
                .map(|c| format!("{}:{}", c.kind, c.text))
                .collect();
            println!("  candidates: {}", shown.join(", "));
        }
        match resolver.resolve_text(post) {
            Some(m) => println!("  {m}"),
            None => println!("  no location"),
        }
        println!();
    }
    Ok(())
}
