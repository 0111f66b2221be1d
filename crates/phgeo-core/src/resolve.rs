// crates/phgeo-core/src/resolve.rs

//! # Disambiguator & Scorer
//!
//! Turns validated candidates into one [`LocationMatch`].
//!
//! 1. **Accept**: rule-based candidates plus the gazetteer sweep (word
//!    n-grams that name something) go through the false-positive filter.
//! 2. **Anchor**: every span that resolves to a province, and then to a
//!    city (using the provinces as hints), becomes an anchor. Spans are cut
//!    into word windows longest first; a window that names something hides
//!    the shorter windows inside it, so "Davao del Norte" never yields
//!    "Davao".
//! 3. **Interpret**: each candidate is looked up at barangay, city and
//!    province level; anchors from *other* spans settle ambiguous names and
//!    count as corroboration, or as contradiction when they name a
//!    different container.
//! 4. **Select**: interpretations are ranked by score, then specificity;
//!    the first one above its level's threshold that survives hierarchy
//!    re-validation wins.
//!
//! A resolver holds no state between calls; the same text always yields the
//! same result.

use crate::config::ResolverConfig;
use crate::extract::{extract, preprocess, segments, Candidate, CandidateKind, MIN_CANDIDATE_LEN};
use crate::filter::{is_false_positive, text_signal, validate_location_candidate, TextSignal};
use crate::gazetteer::{Gazetteer, UnitId};
use crate::model::{AdminUnit, Level, LocationMatch};
use crate::score::{score, ScoreSignals};
use crate::text::{longest_windows, normalize_key};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One scored reading of a span.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    #[serde(skip)]
    id: UnitId,
    pub unit: AdminUnit,
    pub level: Level,
    /// The word window that matched.
    pub span: String,
    pub signals: ScoreSignals,
    pub score: f64,
}

impl Interpretation {
    pub fn unit_id(&self) -> UnitId {
        self.id
    }
}

/// A city or province found in the text. `source` is the key of the
/// window it came from, so a span never corroborates itself.
#[derive(Debug, Clone, PartialEq)]
struct Anchor {
    id: UnitId,
    source: String,
}

#[derive(Debug, Default)]
struct Anchors {
    provinces: Vec<Anchor>,
    cities: Vec<Anchor>,
}

fn push_anchor(list: &mut Vec<Anchor>, id: UnitId, source: String) {
    let anchor = Anchor { id, source };
    if !list.contains(&anchor) {
        list.push(anchor);
    }
}

/// `true` when one key is a whole-token part of the other.
fn overlaps(a: &str, b: &str) -> bool {
    let (pa, pb) = (format!(" {a} "), format!(" {b} "));
    pa.contains(&pb) || pb.contains(&pa)
}

/// `true` when `inner` is a whole-token part of the longer key `outer`.
fn lies_inside(inner: &str, outer: &str) -> bool {
    inner != outer && format!(" {outer} ").contains(&format!(" {inner} "))
}

/// Lookup windows of one accepted candidate.
struct Spans {
    text: Vec<String>,
    context: Vec<String>,
}

pub struct Resolver<'g> {
    gazetteer: &'g Gazetteer,
    config: ResolverConfig,
}

impl<'g> Resolver<'g> {
    pub fn new(gazetteer: &'g Gazetteer) -> Self {
        Self::with_config(gazetteer, ResolverConfig::default())
    }

    pub fn with_config(gazetteer: &'g Gazetteer, config: ResolverConfig) -> Self {
        Self { gazetteer, config }
    }

    pub fn gazetteer(&self) -> &'g Gazetteer {
        self.gazetteer
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Extracts candidates from `text` and resolves them.
    pub fn resolve_text(&self, text: &str) -> Option<LocationMatch> {
        self.resolve(&extract(text), text)
    }

    /// Resolves already extracted candidates against their source text.
    ///
    /// Returns `None` when nothing clears its threshold; that is the normal
    /// answer for texts without a location, not an error.
    pub fn resolve(&self, candidates: &[Candidate], full_text: &str) -> Option<LocationMatch> {
        let ranked = self.rank(candidates, full_text);
        self.select(&ranked)
    }

    /// Every scored interpretation of `text`, best first.
    pub fn explain(&self, text: &str) -> Vec<Interpretation> {
        self.rank(&extract(text), text)
    }

    /// Candidates of `text` that pass the false-positive filter, sweep
    /// candidates included.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        self.accept(extract(text), &preprocess(text))
    }

    // -----------------------------------------------------------------------
    // Pipeline
    // -----------------------------------------------------------------------

    fn accept(&self, mut candidates: Vec<Candidate>, pre: &str) -> Vec<Candidate> {
        if self.config.sweep {
            candidates.extend(self.sweep(pre));
        }
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .filter(|c| {
                let v = validate_location_candidate(c, pre);
                if let Some(reason) = v.reason {
                    tracing::trace!(kind = %c.kind, text = %c.text, %reason, "candidate rejected");
                }
                v.is_valid
            })
            .collect()
    }

    /// Word n-grams of the text that name something in the gazetteer.
    fn sweep(&self, pre: &str) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = Vec::new();
        for segment in segments(pre) {
            let grams = longest_windows(segment, self.config.max_ngram, |w| self.names_something(w));
            for (gram, hit) in grams {
                if hit && !out.iter().any(|c| c.text == gram) {
                    out.push(Candidate::new(CandidateKind::Location, gram));
                }
            }
        }
        out
    }

    fn names_something(&self, w: &str) -> bool {
        if w.chars().filter(|c| c.is_alphanumeric()).count() < MIN_CANDIDATE_LEN {
            return false;
        }
        let key = normalize_key(w);
        !key.is_empty() && self.gazetteer.knows_key(&key)
    }

    fn rank(&self, candidates: &[Candidate], full_text: &str) -> Vec<Interpretation> {
        let pre = preprocess(full_text);
        let signal = text_signal(&pre);
        let accepted = self.accept(candidates.to_vec(), &pre);
        tracing::debug!(
            extracted = candidates.len(),
            accepted = accepted.len(),
            context = ?signal.strength,
            "candidates validated"
        );

        let spans: Vec<Spans> = accepted
            .iter()
            .map(|c| Spans {
                text: self.lookup_windows(&c.text, &pre),
                context: c
                    .context
                    .as_deref()
                    .map(|ctx| self.lookup_windows(ctx, &pre))
                    .unwrap_or_default(),
            })
            .collect();
        let anchors = self.anchors(&accepted, &spans);

        let mut best: HashMap<UnitId, Interpretation> = HashMap::new();
        for (candidate, spans) in accepted.iter().zip(&spans) {
            for interp in self.interpret(candidate, spans, &anchors, &signal) {
                let better = best.get(&interp.id).map_or(true, |seen| interp.score > seen.score);
                if better {
                    best.insert(interp.id, interp);
                }
            }
        }

        let mut ranked: Vec<Interpretation> = best.into_values().collect();
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(b.level.specificity().cmp(&a.level.specificity()))
                .then(a.id.cmp(&b.id))
        });
        ranked
    }

    fn select(&self, ranked: &[Interpretation]) -> Option<LocationMatch> {
        let weights = &self.config.weights;
        for interp in ranked {
            if interp.score < weights.threshold(interp.level) {
                continue;
            }
            let mut m = LocationMatch::from_unit(&interp.unit, weights.confidence(interp.score));
            if self.gazetteer.demote_inconsistent(&mut m) {
                tracing::debug!(result = %m, span = %interp.span, "location resolved");
                return Some(m);
            }
        }
        tracing::debug!(interpretations = ranked.len(), "no location above threshold");
        None
    }

    /// Windows of a span worth a lookup: long enough, not rejected by the
    /// filter on their own, and not inside a longer window that names
    /// something.
    fn lookup_windows(&self, span: &str, pre: &str) -> Vec<String> {
        let usable = |w: &str| {
            w.chars().filter(|c| c.is_alphanumeric()).count() >= MIN_CANDIDATE_LEN
                && !is_false_positive(w, pre)
        };
        longest_windows(span, self.config.max_ngram, |w| usable(w) && self.names_something(w))
            .into_iter()
            .map(|(w, _)| w)
            .filter(|w| usable(w.as_str()))
            .collect()
    }

    fn anchors(&self, accepted: &[Candidate], spans: &[Spans]) -> Anchors {
        let g = self.gazetteer;
        let sources: Vec<&String> = accepted
            .iter()
            .zip(spans)
            .flat_map(|(c, s)| {
                let own = (c.kind != CandidateKind::Barangay).then_some(&s.text);
                own.into_iter().flatten().chain(&s.context)
            })
            .collect();

        let mut anchors = Anchors::default();
        for w in &sources {
            if let Some(id) = g.province_id(w) {
                push_anchor(&mut anchors.provinces, id, normalize_key(w));
            }
        }
        for w in &sources {
            let key = normalize_key(w);
            if anchors.provinces.iter().any(|a| lies_inside(&key, &a.source)) {
                continue;
            }
            let hinted = anchors
                .provinces
                .iter()
                .filter(|a| !overlaps(&key, &a.source))
                .find_map(|a| g.city_id(w, g.unit(a.id).province()));
            if let Some(id) = hinted.or_else(|| g.city_id(w, None)) {
                push_anchor(&mut anchors.cities, id, key);
            }
        }
        tracing::trace!(
            provinces = anchors.provinces.len(),
            cities = anchors.cities.len(),
            "anchors collected"
        );
        anchors
    }

    fn interpret(
        &self,
        candidate: &Candidate,
        spans: &Spans,
        anchors: &Anchors,
        signal: &TextSignal,
    ) -> Vec<Interpretation> {
        let levels: &[Level] = match candidate.kind {
            CandidateKind::Barangay => &[Level::Barangay],
            CandidateKind::City => &[Level::City],
            CandidateKind::Province => &[Level::Province],
            CandidateKind::Area | CandidateKind::Sequence | CandidateKind::Location => {
                &[Level::Barangay, Level::City, Level::Province]
            }
        };

        let mut out = Vec::new();
        for &level in levels {
            let hit = spans.text.iter().find_map(|w| {
                self.lookup(level, w, candidate.context.as_deref(), anchors, signal)
                    .map(|found| (w, found))
            });
            if let Some((w, (id, signals))) = hit {
                let s = score(&signals, &self.config.weights);
                tracing::trace!(span = %w, %level, unit = id, score = s, ?signals, "interpretation");
                out.push(Interpretation {
                    id,
                    unit: self.gazetteer.unit(id).clone(),
                    level,
                    span: w.clone(),
                    signals,
                    score: s,
                });
            }
        }
        out
    }

    fn lookup(
        &self,
        level: Level,
        w: &str,
        context: Option<&str>,
        anchors: &Anchors,
        signal: &TextSignal,
    ) -> Option<(UnitId, ScoreSignals)> {
        let g = self.gazetteer;
        let key = normalize_key(w);
        let cities: Vec<&Anchor> = anchors.cities.iter().filter(|a| !overlaps(&key, &a.source)).collect();
        let provinces: Vec<&Anchor> = anchors
            .provinces
            .iter()
            .filter(|a| !overlaps(&key, &a.source))
            .collect();

        let same_province = |a: UnitId, b: UnitId| {
            let (ka, kb) = (g.keys(a), g.keys(b));
            !ka.province.is_empty() && ka.province == kb.province
        };
        let same_city = |a: UnitId, b: UnitId| {
            let (ka, kb) = (g.keys(a), g.keys(b));
            !ka.city.is_empty() && ka.city == kb.city && ka.province == kb.province
        };

        let mut signals = ScoreSignals::new(level);
        signals.explicit_marker = signal.explicit();
        signals.country_marker = signal.country;
        signals.text_confidence = signal.confidence();
        signals.slang = signal.slang;

        let id = match level {
            Level::Barangay => {
                // An ambiguous name needs its city; a province settles it
                // only when one barangay of that name lies inside.
                let id = g
                    .barangay_id(w, None, None)
                    .or_else(|| context.and_then(|ctx| g.barangay_id_strict(w, Some(ctx), Some(ctx))))
                    .or_else(|| cities.iter().find_map(|a| g.barangay_id(w, g.unit(a.id).city(), None)))
                    .or_else(|| {
                        provinces
                            .iter()
                            .find_map(|a| g.barangay_id_strict(w, None, g.unit(a.id).province()))
                    })?;
                signals.city_corroborated = context.is_some_and(|ctx| g.hint_names_city(ctx, id))
                    || cities.iter().any(|a| same_city(a.id, id));
                signals.corroborated = signals.city_corroborated
                    || context.is_some_and(|ctx| g.hint_names_province(ctx, id))
                    || provinces.iter().any(|a| same_province(a.id, id));
                signals.ambiguous = g.is_ambiguous_barangay(w);
                signals.contradicted = (!cities.is_empty() && !signals.city_corroborated)
                    || (!provinces.is_empty() && !signals.corroborated);
                id
            }
            Level::City => {
                let id = provinces
                    .iter()
                    .find_map(|a| g.city_id(w, g.unit(a.id).province()))
                    .or_else(|| g.city_id(w, None))?;
                signals.corroborated = context.is_some_and(|ctx| g.hint_names_province(ctx, id))
                    || provinces.iter().any(|a| same_province(a.id, id));
                signals.contradicted = !signals.corroborated && !provinces.is_empty();
                id
            }
            Level::Province => {
                let id = g.province_id(w)?;
                signals.corroborated = cities.iter().any(|a| same_province(a.id, id));
                signals.contradicted = !signals.corroborated && !cities.is_empty();
                id
            }
            Level::Region => return None,
        };
        Some((id, signals))
    }
}

/// Resolves `text` with default settings.
///
/// ```rust,no_run
/// use phgeo_core::{resolve_location, Gazetteer};
///
/// let gazetteer = Gazetteer::load()?;
/// if let Some(m) = resolve_location(gazetteer, "Taga Davao City ako") {
///     println!("{m}");
/// }
/// # Ok::<(), phgeo_core::GeoError>(())
/// ```
pub fn resolve_location(gazetteer: &Gazetteer, text: &str) -> Option<LocationMatch> {
    Resolver::new(gazetteer).resolve_text(text)
}
