// crates/phgeo-core/src/score.rs

//! Confidence scoring as a transparent weighted sum.
//!
//! ```text
//! score = (base(level) + corroboration - ambiguity - contradiction
//!          + explicit + country)
//!         * (1 + text_confidence)
//!         * slang_factor            (only when slang markers are present)
//! ```
//!
//! Every term is a named field of [`ScoreWeights`] so each signal can be
//! tuned and tested on its own.

use crate::model::Level;
use serde::{Deserialize, Serialize};

/// Weights and thresholds of the scoring function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub barangay_base: f64,
    pub city_base: f64,
    pub province_base: f64,
    /// Another span resolves to the city or province containing the match.
    pub corroboration: f64,
    /// Ambiguous barangay name with no corroborating city in the text.
    pub ambiguity_penalty: f64,
    /// Ambiguous barangay name settled by a corroborating city.
    pub hinted_ambiguity_penalty: f64,
    /// The text names a different province (or, for a barangay, a different
    /// city) than the one containing the match.
    pub contradiction_penalty: f64,
    pub explicit_bonus: f64,
    pub country_bonus: f64,
    /// Multiplier applied when slang or jest markers are present.
    pub slang_factor: f64,
    /// Minimum score for a barangay- or city-level answer.
    pub min_score: f64,
    /// Minimum score for a province-only answer.
    pub province_min_score: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            barangay_base: 0.6,
            city_base: 0.5,
            province_base: 0.35,
            corroboration: 0.3,
            ambiguity_penalty: 0.6,
            hinted_ambiguity_penalty: 0.15,
            contradiction_penalty: 0.3,
            explicit_bonus: 0.15,
            country_bonus: 0.1,
            slang_factor: 0.3,
            min_score: 0.45,
            province_min_score: 0.35,
        }
    }
}

impl ScoreWeights {
    pub fn base(&self, level: Level) -> f64 {
        match level {
            Level::Barangay => self.barangay_base,
            Level::City => self.city_base,
            Level::Province => self.province_base,
            Level::Region => 0.0,
        }
    }

    /// The score a match must reach to be returned at `level`.
    pub fn threshold(&self, level: Level) -> f64 {
        match level {
            Level::Barangay | Level::City => self.min_score,
            Level::Province | Level::Region => self.province_min_score,
        }
    }

    /// Highest score reachable: a corroborated barangay with every bonus
    /// and full text confidence.
    pub fn max_score(&self) -> f64 {
        (self.barangay_base + self.corroboration + self.explicit_bonus + self.country_bonus) * 2.0
    }

    /// Maps a raw score onto `0.0..=1.0`.
    pub fn confidence(&self, score: f64) -> f64 {
        let max = self.max_score();
        if max <= 0.0 {
            return 0.0;
        }
        (score / max).clamp(0.0, 1.0)
    }
}

/// Named inputs of the scoring function for one interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSignals {
    pub level: Level,
    /// A sibling span resolves to the containing city or province.
    pub corroborated: bool,
    /// Specifically the containing city was found elsewhere in the text.
    pub city_corroborated: bool,
    /// The barangay name is shared by several units.
    pub ambiguous: bool,
    /// Sibling spans name containers other than the match's own.
    pub contradicted: bool,
    pub explicit_marker: bool,
    pub country_marker: bool,
    /// Strength of the text's location context, `0.0..=1.0`.
    pub text_confidence: f64,
    pub slang: bool,
}

impl ScoreSignals {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            corroborated: false,
            city_corroborated: false,
            ambiguous: false,
            contradicted: false,
            explicit_marker: false,
            country_marker: false,
            text_confidence: 0.0,
            slang: false,
        }
    }
}

/// Pure weighted sum over the signals; never negative.
pub fn score(signals: &ScoreSignals, weights: &ScoreWeights) -> f64 {
    let mut s = weights.base(signals.level);
    if signals.corroborated {
        s += weights.corroboration;
    }
    if signals.ambiguous {
        s -= if signals.city_corroborated {
            weights.hinted_ambiguity_penalty
        } else {
            weights.ambiguity_penalty
        };
    }
    if signals.contradicted {
        s -= weights.contradiction_penalty;
    }
    if signals.explicit_marker {
        s += weights.explicit_bonus;
    }
    if signals.country_marker {
        s += weights.country_bonus;
    }
    s *= 1.0 + signals.text_confidence.clamp(0.0, 1.0);
    if signals.slang {
        s *= weights.slang_factor;
    }
    s.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn base_scores_reward_specificity() {
        let w = ScoreWeights::default();
        let s = |level| score(&ScoreSignals::new(level), &w);
        assert!(s(Level::Barangay) > s(Level::City));
        assert!(s(Level::City) > s(Level::Province));
    }

    #[test]
    fn corroboration_adds_a_bonus() {
        let w = ScoreWeights::default();
        let plain = ScoreSignals::new(Level::City);
        let backed = ScoreSignals { corroborated: true, ..plain };
        assert!(approx(score(&backed, &w) - score(&plain, &w), w.corroboration));
    }

    #[test]
    fn ambiguity_penalty_depends_on_city_support() {
        let w = ScoreWeights::default();
        let bare = ScoreSignals { ambiguous: true, ..ScoreSignals::new(Level::Barangay) };
        let hinted = ScoreSignals { corroborated: true, city_corroborated: true, ..bare };
        assert!(approx(score(&bare, &w), 0.0));
        assert!(approx(score(&hinted, &w), 0.6 + 0.3 - 0.15));
    }

    #[test]
    fn contradiction_drops_a_city_below_threshold() {
        let w = ScoreWeights::default();
        let plain = ScoreSignals::new(Level::City);
        let contradicted = ScoreSignals { contradicted: true, ..plain };
        assert!(approx(score(&plain, &w) - score(&contradicted, &w), w.contradiction_penalty));
        assert!(score(&contradicted, &w) < w.threshold(Level::City));
    }

    #[test]
    fn text_confidence_multiplies() {
        let w = ScoreWeights::default();
        let s = ScoreSignals { text_confidence: 0.7, ..ScoreSignals::new(Level::City) };
        assert!(approx(score(&s, &w), 0.85));
        let over = ScoreSignals { text_confidence: 3.0, ..s };
        assert!(approx(score(&over, &w), 1.0));
    }

    #[test]
    fn slang_suppresses_below_threshold() {
        let w = ScoreWeights::default();
        let s = ScoreSignals { slang: true, ..ScoreSignals::new(Level::City) };
        assert!(score(&s, &w) < w.threshold(Level::City));
    }

    #[test]
    fn markers_add_bonuses() {
        let w = ScoreWeights::default();
        let s = ScoreSignals {
            explicit_marker: true,
            country_marker: true,
            ..ScoreSignals::new(Level::Province)
        };
        assert!(approx(score(&s, &w), 0.35 + 0.15 + 0.1));
    }

    #[test]
    fn confidence_is_normalized() {
        let w = ScoreWeights::default();
        let best = ScoreSignals {
            corroborated: true,
            explicit_marker: true,
            country_marker: true,
            text_confidence: 1.0,
            ..ScoreSignals::new(Level::Barangay)
        };
        assert!(approx(w.confidence(score(&best, &w)), 1.0));
        assert_eq!(w.confidence(-1.0), 0.0);
        assert_eq!(w.confidence(10.0), 1.0);
    }
}
