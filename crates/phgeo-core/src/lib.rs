// crates/phgeo-core/src/lib.rs

//! Rule-based location resolver for Philippine social-media text.
//!
//! The pipeline runs leaf-first: the [`gazetteer`] index is built once, then
//! every text goes through [`extract`] → [`filter`] → [`resolve`], which
//! scores hierarchy matches with [`score`] and returns the most specific
//! consistent [`LocationMatch`].

pub mod alias;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod gazetteer;
pub mod lexicon;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod score;
pub mod text;
// Dataset wire format, only used by the loader.
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::config::ResolverConfig;
pub use crate::error::{GeoError, Result};
pub use crate::extract::{extract, preprocess, Candidate, CandidateKind};
pub use crate::filter::{has_location_context, is_false_positive, validate_location_candidate, Validation};
pub use crate::gazetteer::{Gazetteer, UnitId};
pub use crate::loader::snapshot::CompressionMode;
pub use crate::model::{AdminUnit, DbStats, Level, LocationMatch, NONE};
pub use crate::resolve::{resolve_location, Interpretation, Resolver};
pub use crate::score::{ScoreSignals, ScoreWeights};
pub use crate::text::{fold_key, normalize_key};
