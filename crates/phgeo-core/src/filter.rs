// crates/phgeo-core/src/filter.rs

//! # False-Positive Filter
//!
//! Decides whether a candidate span can name a place at all, before any
//! gazetteer lookup happens. Three rejection rules, each independent:
//!
//! 1. **Word lists**: Filipino function words and English common words.
//! 2. **Verb morphology**: Tagalog/Bisaya affix shapes (reduplicated
//!    prefixes, `-um-`/`-in-` infixes, request prefixes, circumfixes).
//! 3. **Context-dependent words**: names like "Bay" or "Real" pass only
//!    when the text carries some location context.
//!
//! A fourth check requires the candidate to occur in the text as a whole
//! token sequence, never inside a longer word.

use crate::extract::{Candidate, MIN_CANDIDATE_LEN};
use crate::lexicon::{
    is_common_word, is_context_word, is_function_word, is_slang_marker, COUNTRY_MARKERS,
};
use crate::text::{fold_key, words};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EXPLICIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:location|loc|address|addr|lugar|place)\s*(?:is\b|=|:)").expect("valid regex")
});

static STRONG_LOCATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:taga|nasa|gikan\s+sa|naa\s+sa|dito\s+sa|diri\s+sa|galing\s+sa|mula\s+sa|nakatira\s+sa)\s+\w",
    )
    .expect("valid regex")
});

static WEAK_LOCATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?i:from|at|in|near|around|sa)\s+\p{Lu}").expect("valid regex")
});

static ADMIN_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:city|province|prov|barangay|municipality|town|bayan|lungsod|lalawigan|purok|sitio)\b",
    )
    .expect("valid regex")
});

static AREA_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\w+\s+area\b").expect("valid regex"));

static DIRECTIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:north|south|east|west|northern|southern|eastern|western|norte|sur|hilaga|timog|silangan|kanluran)\b",
    )
    .expect("valid regex")
});

/// How strongly a text says "this is where".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContextStrength {
    None,
    Directional,
    AreaSuffix,
    AdminMarker,
    Locative,
    Explicit,
}

impl ContextStrength {
    /// The 0–1 text confidence fed into the score multiplier.
    pub fn confidence(self) -> f64 {
        match self {
            ContextStrength::None => 0.0,
            ContextStrength::Directional => 0.2,
            ContextStrength::AreaSuffix => 0.4,
            ContextStrength::AdminMarker => 0.5,
            ContextStrength::Locative => 0.7,
            ContextStrength::Explicit => 1.0,
        }
    }
}

/// Text-level signals shared by every candidate of one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSignal {
    pub strength: ContextStrength,
    pub slang: bool,
    pub country: bool,
}

impl TextSignal {
    pub fn confidence(&self) -> f64 {
        self.strength.confidence()
    }

    pub fn explicit(&self) -> bool {
        self.strength == ContextStrength::Explicit
    }
}

/// The strongest location-context pattern found in `text`.
pub fn context_strength(text: &str) -> ContextStrength {
    if EXPLICIT.is_match(text) {
        ContextStrength::Explicit
    } else if STRONG_LOCATIVE.is_match(text) || WEAK_LOCATIVE.is_match(text) {
        ContextStrength::Locative
    } else if ADMIN_MARKER.is_match(text) {
        ContextStrength::AdminMarker
    } else if AREA_SUFFIX.is_match(text) {
        ContextStrength::AreaSuffix
    } else if DIRECTIONAL.is_match(text) {
        ContextStrength::Directional
    } else {
        ContextStrength::None
    }
}

/// `true` when the text states a location in any recognizable way.
pub fn has_location_context(text: &str) -> bool {
    context_strength(text) != ContextStrength::None
}

pub fn text_signal(text: &str) -> TextSignal {
    let folded = fold_key(text);
    let tokens = words(&folded);
    TextSignal {
        strength: context_strength(text),
        slang: tokens.iter().any(|t| is_slang_marker(t)) || folded.contains("sana all"),
        country: tokens.iter().any(|t| COUNTRY_MARKERS.contains(t)),
    }
}

// -----------------------------------------------------------------------------
// Verb morphology
// -----------------------------------------------------------------------------

/// Actor-focus and aspect prefixes that precede a reduplicated syllable.
const REDUP_PREFIXES: &[&str] = &[
    "nagpa", "magpa", "pinag", "ipag", "naka", "maka", "nang", "mang", "nag",
    "mag", "pag", "pina", "ipa", "ka",
];

/// Prefixes that already carry the reduplicated syllable (`nakakainis`).
const BUILT_IN_REDUP: &[&str] = &["nakaka", "makaka", "nagpapa", "magpapa", "nakapag", "makapag"];

/// Prefixes written with a hyphen before a vowel or a loan word.
const HYPHEN_PREFIXES: &[&str] = &["nag", "mag", "pag", "naka", "maka", "ipag", "nakapag", "makapag"];

/// Polite-request and social prefixes.
const REQUEST_PREFIXES: &[&str] = &["paki", "naki", "maki"];

/// Object-focus suffixes that only appear on verbs.
const VERB_SUFFIXES: &[&str] = &["hin", "hon"];

/// `(prefix, suffix)` pairs wrapping a reduplicated stem.
const CIRCUMFIXES: &[(&str, &str)] = &[("pag", "an"), ("ka", "an"), ("pinag", "an"), ("gi", "an")];

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// `aaral`, `luluto`, `kakain`: the stem opens with a repeated V or CV.
fn reduplicated(stem: &[u8]) -> bool {
    if stem.len() >= 3 && is_vowel(stem[0]) && stem[0] == stem[1] {
        return true;
    }
    stem.len() >= 5 && !is_vowel(stem[0]) && is_vowel(stem[1]) && stem[0] == stem[2] && stem[1] == stem[3]
}

/// `true` when `word` has the shape of a Tagalog/Bisaya verb.
///
/// ```rust
/// use phgeo_core::filter::is_verb_shaped;
///
/// assert!(is_verb_shaped("nagluluto"));
/// assert!(is_verb_shaped("kumakain"));
/// assert!(is_verb_shaped("mag-order"));
/// assert!(!is_verb_shaped("Pagadian"));
/// assert!(!is_verb_shaped("Binangonan"));
/// ```
pub fn is_verb_shaped(word: &str) -> bool {
    let w = fold_key(word);
    if w.len() < 5 || !w.bytes().all(|b| b.is_ascii_lowercase() || b == b'-') {
        return false;
    }

    for p in HYPHEN_PREFIXES {
        if w.strip_prefix(p).is_some_and(|rest| rest.len() > 3 && rest.starts_with('-')) {
            return true;
        }
    }

    let w = w.replace('-', "");
    let b = w.as_bytes();

    if REDUP_PREFIXES
        .iter()
        .any(|p| w.strip_prefix(p).is_some_and(|stem| reduplicated(stem.as_bytes())))
    {
        return true;
    }

    if BUILT_IN_REDUP
        .iter()
        .chain(REQUEST_PREFIXES)
        .any(|p| w.strip_prefix(p).is_some_and(|stem| stem.len() >= 3))
    {
        return true;
    }

    // k-um-a-kain, s-in-a-sabi: drop the infix and look for reduplication.
    if b.len() >= 6 && !is_vowel(b[0]) && (&b[1..3] == b"um" || &b[1..3] == b"in") {
        let mut stem = vec![b[0]];
        stem.extend_from_slice(&b[3..]);
        if reduplicated(&stem) {
            return true;
        }
    }

    if b.len() >= 6 && VERB_SUFFIXES.iter().any(|s| w.ends_with(s)) {
        return true;
    }

    CIRCUMFIXES.iter().any(|(p, s)| {
        w.len() >= p.len() + s.len() + 4
            && w.starts_with(p)
            && w.ends_with(s)
            && reduplicated(w[p.len()..w.len() - s.len()].as_bytes())
    })
}

// -----------------------------------------------------------------------------
// Candidate validation
// -----------------------------------------------------------------------------

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    FunctionWord,
    CommonWord,
    VerbShaped,
    NeedsContext,
    NotAToken,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::TooShort => "shorter than the minimum candidate length",
            Rejection::FunctionWord => "Filipino function word",
            Rejection::CommonWord => "common word",
            Rejection::VerbShaped => "verb-shaped word",
            Rejection::NeedsContext => "ambiguous word without location context",
            Rejection::NotAToken => "not a whole token of the text",
        };
        f.write_str(s)
    }
}

/// Outcome of [`validate_location_candidate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub reason: Option<Rejection>,
}

impl Validation {
    fn accept() -> Self {
        Self { is_valid: true, reason: None }
    }

    fn reject(reason: Rejection) -> Self {
        Self { is_valid: false, reason: Some(reason) }
    }
}

/// Which word-level rule, if any, rejects `word` in `full_text`.
pub fn false_positive_reason(word: &str, full_text: &str) -> Option<Rejection> {
    let folded = fold_key(word);
    let tokens: Vec<&str> = folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Some(Rejection::TooShort);
    }
    if tokens.iter().all(|t| is_function_word(t)) {
        return Some(Rejection::FunctionWord);
    }
    if tokens.iter().all(|t| is_function_word(t) || is_common_word(t)) {
        return Some(Rejection::CommonWord);
    }
    if let [only] = tokens.as_slice() {
        if is_verb_shaped(only) {
            return Some(Rejection::VerbShaped);
        }
    }
    if is_context_word(&tokens.join(" ")) && !has_location_context(full_text) {
        return Some(Rejection::NeedsContext);
    }
    None
}

pub fn is_false_positive(word: &str, full_text: &str) -> bool {
    false_positive_reason(word, full_text).is_some()
}

/// Runs every filter rule plus the token-boundary check on a candidate.
pub fn validate_location_candidate(candidate: &Candidate, full_text: &str) -> Validation {
    let text = candidate.text.trim();
    if text.chars().filter(|c| c.is_alphanumeric()).count() < MIN_CANDIDATE_LEN {
        return Validation::reject(Rejection::TooShort);
    }
    if let Some(reason) = false_positive_reason(text, full_text) {
        return Validation::reject(reason);
    }
    if !occurs_as_token(text, full_text) {
        return Validation::reject(Rejection::NotAToken);
    }
    Validation::accept()
}

/// `true` when `needle` occurs in `haystack` bounded by non-alphanumeric
/// characters or the string edges (case and diacritics ignored).
///
/// ```rust
/// use phgeo_core::filter::occurs_as_token;
///
/// assert!(occurs_as_token("Pasig", "baha sa Pasig!"));
/// assert!(!occurs_as_token("Pasig", "mga Pasigueño"));
/// ```
pub fn occurs_as_token(needle: &str, haystack: &str) -> bool {
    let collapse = |s: &str| fold_key(s).split_whitespace().collect::<Vec<_>>().join(" ");
    let n = collapse(needle);
    let h = collapse(haystack);
    if n.is_empty() {
        return false;
    }
    h.match_indices(&n).any(|(i, _)| {
        let before = h[..i].chars().next_back();
        let after = h[i + n.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CandidateKind;

    fn cand(text: &str) -> Candidate {
        Candidate::new(CandidateKind::Location, text)
    }

    #[test]
    fn context_strength_ladder() {
        assert_eq!(context_strength("Location: Marikina"), ContextStrength::Explicit);
        assert_eq!(context_strength("taga marikina ako"), ContextStrength::Locative);
        assert_eq!(context_strength("brownout in Pasig"), ContextStrength::Locative);
        assert_eq!(context_strength("pasig city brownout"), ContextStrength::AdminMarker);
        assert_eq!(context_strength("cubao area"), ContextStrength::AreaSuffix);
        assert_eq!(context_strength("north side"), ContextStrength::Directional);
        assert_eq!(context_strength("Same here"), ContextStrength::None);
    }

    #[test]
    fn weak_locative_needs_capital() {
        assert!(!has_location_context("nasira in a minute"));
        assert!(has_location_context("stuck in Cubao"));
    }

    #[test]
    fn slang_and_country_markers() {
        let s = text_signal("sarado AF malolos");
        assert!(s.slang);
        assert!(!s.country);
        assert!(text_signal("sana all may kuryente").slang);
        assert!(text_signal("Cebu, Philippines").country);
    }

    #[test]
    fn verb_shapes() {
        for verb in [
            "nagluluto", "nag-aaral", "magkakaroon", "nakakainis", "kumakain", "sinasabi",
            "pakisabi", "mag-text", "sabihin", "kararating",
        ] {
            assert!(is_verb_shaped(verb), "{verb} should look like a verb");
        }
        for place in [
            "Nagcarlan", "Pagadian", "Mangaldan", "Binangonan", "Tumauini", "Pinamalayan",
            "Kalayaan", "Sumilao", "Marikina", "Naga", "Pakil",
        ] {
            assert!(!is_verb_shaped(place), "{place} should not look like a verb");
        }
    }

    #[test]
    fn word_lists_reject() {
        assert_eq!(false_positive_reason("ako", ""), Some(Rejection::FunctionWord));
        assert_eq!(false_positive_reason("Same here", ""), Some(Rejection::CommonWord));
        assert_eq!(false_positive_reason("nagluluto", ""), Some(Rejection::VerbShaped));
        assert_eq!(false_positive_reason("Marikina", ""), None);
    }

    #[test]
    fn context_words_need_context() {
        assert!(is_false_positive("Bay", "nice bay view"));
        assert!(!is_false_positive("Bay", "taga Bay, Laguna"));
        assert!(!is_false_positive("Real", "Real area"));
    }

    #[test]
    fn validation_reports_reasons() {
        let text = "mga Pasigueño sa Marikina";
        assert!(validate_location_candidate(&cand("Marikina"), text).is_valid);
        assert_eq!(
            validate_location_candidate(&cand("Pasig"), text).reason,
            Some(Rejection::NotAToken)
        );
        assert_eq!(validate_location_candidate(&cand("QC"), text).reason, Some(Rejection::TooShort));
    }

    #[test]
    fn token_boundaries_ignore_case_and_spacing() {
        assert!(occurs_as_token("san roque", "Brgy San  Roque, Marikina"));
        assert!(occurs_as_token("Dasmariñas", "taga dasmarinas"));
        assert!(!occurs_as_token("Roque", "Roquetas"));
        assert!(!occurs_as_token("", "anything"));
    }
}
