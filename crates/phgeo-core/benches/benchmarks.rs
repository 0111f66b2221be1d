//! Resolver and index benchmarks over the bundled sample dataset.
//!
//! ```bash
//! cargo bench -p phgeo-core --bench benchmarks
//! ```

use criterion::{criterion_group, criterion_main, Criterion};
use phgeo_core::{extract, Gazetteer, Resolver};
use std::hint::black_box;

const POSTS: &[&str] = &[
    "Brgy. 171, North Caloocan.",
    "Consolacion, Cebu",
    "Taga Davao City ako",
    "Montalban Rizal",
    "sarado AF malolos",
    "#walangpasokMarikina grabe baha dito sa San Roque, Marikina",
    "Same here",
];

fn bench_index(c: &mut Criterion) {
    let path = Gazetteer::default_data_dir().join(Gazetteer::default_dataset_filename());
    c.bench_function("gazetteer_build_sample", |b| {
        b.iter(|| Gazetteer::load_from_path(black_box(&path)).unwrap())
    });

    let g = Gazetteer::load().unwrap();
    c.bench_function("find_barangay_hinted", |b| {
        b.iter(|| g.find_barangay(black_box("San Roque"), Some("Marikina"), None))
    });
    c.bench_function("find_city_priority", |b| {
        b.iter(|| g.find_city(black_box("Quezon"), None))
    });
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_posts", |b| {
        b.iter(|| {
            for post in POSTS {
                black_box(extract(black_box(post)));
            }
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let g = Gazetteer::load().unwrap();
    let resolver = Resolver::new(g);
    c.bench_function("resolve_posts", |b| {
        b.iter(|| {
            for post in POSTS {
                black_box(resolver.resolve_text(black_box(post)));
            }
        })
    });
}

criterion_group!(benches, bench_index, bench_extract, bench_resolve);
criterion_main!(benches);
