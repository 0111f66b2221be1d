// crates/phgeo-core/src/config.rs
use crate::error::{GeoError, Result};
use crate::score::ScoreWeights;
use serde::{Deserialize, Serialize};
#[cfg(feature = "json")]
use std::path::Path;

/// Resolver settings. Every field has a default, so a config file only
/// needs the values it changes.
///
/// ```json
/// { "weights": { "min_score": 0.5 }, "max_ngram": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub weights: ScoreWeights,
    /// Longest word window tried against the gazetteer.
    pub max_ngram: usize,
    /// Also scan the text's word n-grams for known names.
    pub sweep: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            max_ngram: 4,
            sweep: true,
        }
    }
}

impl ResolverConfig {
    pub fn validate(self) -> Result<Self> {
        if self.max_ngram == 0 {
            return Err(GeoError::InvalidData("max_ngram must be at least 1".into()));
        }
        let w = &self.weights;
        if !(0.0..=1.0).contains(&w.slang_factor) {
            return Err(GeoError::InvalidData("slang_factor must be within 0..=1".into()));
        }
        if w.max_score() <= 0.0 {
            return Err(GeoError::InvalidData("weights leave no positive score".into()));
        }
        Ok(self)
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: ResolverConfig = serde_json::from_str(s)?;
        cfg.validate()
    }

    #[cfg(feature = "json")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "loading resolver config");
        Self::from_json_str(&text)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ResolverConfig::from_json_str(r#"{ "weights": { "min_score": 0.5 }, "sweep": false }"#)
            .unwrap();
        assert_eq!(cfg.weights.min_score, 0.5);
        assert_eq!(cfg.weights.city_base, ScoreWeights::default().city_base);
        assert_eq!(cfg.max_ngram, 4);
        assert!(!cfg.sweep);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ResolverConfig::from_json_str(r#"{ "max_ngram": 0 }"#),
            Err(GeoError::InvalidData(_))
        ));
        assert!(matches!(
            ResolverConfig::from_json_str(r#"{ "max_ngram": "four" }"#),
            Err(GeoError::Json(_))
        ));
    }
}
