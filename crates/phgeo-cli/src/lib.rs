//! phgeo-cli
//! ==========
//!
//! Command-line interface for the `phgeo-core` location resolver.
//!
//! This crate primarily provides a binary (`phgeo`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview. See the README for full usage examples.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install --path crates/phgeo-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! phgeo --help
//! phgeo stats
//! phgeo resolve "Consolacion, Cebu"
//! phgeo --json explain "Brgy. 171, North Caloocan."
//! phgeo barangay "San Roque" --city Marikina
//! ```
//!
//! For programmatic access to the resolver and the gazetteer, use the
//! [`phgeo-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
