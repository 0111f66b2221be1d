// crates/phgeo-core/src/extract.rs

//! # Candidate Extractor
//!
//! Turns raw post text into typed [`Candidate`] spans. Every rule runs on
//! the same preprocessed text and the results are unioned; overlapping
//! candidates are expected and left for the resolver to sort out.
//!
//! Preprocessing:
//!
//! * hashtag bodies are split into words (`#walangpasokMarikina` →
//!   `walangpasok Marikina`);
//! * abbreviations from [`crate::alias::TEXT_ABBREVIATIONS`] are expanded
//!   (`Brgy.` → `Barangay`, `QC` → `Quezon City`, `Montalban` → `Rodriguez`).
//!
//! Rules, in order:
//!
//! 1. explicit declarations (`location: X, Y`)
//! 2. locative markers (`taga X`, `nasa X`, `gikan sa X`, `from X`)
//! 3. barangay + city pairs (`Brgy. 171, North Caloocan`)
//! 4. area suffix (`Cubao area`)
//! 5. comma lists of capitalized spans (`Consolacion, Cebu`)
//! 6. lower-case word triples without stopwords
//! 7. hashtag place names
//! 8. province markers (`Cebu Province`, `Province of Laguna`)

use crate::alias::TEXT_ABBREVIATIONS;
use crate::lexicon::{is_function_word, is_stopword, HASHTAG_PREFIXES};
use crate::text::{fold_key, split_camel, words};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;

/// Candidates with fewer alphanumeric characters are dropped.
pub const MIN_CANDIDATE_LEN: usize = 3;

/// Words that may join the parts of a place name.
const CONNECTORS: &[&str] = &["de", "del", "dela", "la", "las", "los", "of", "y"];

/// A capitalized word, including `Niño`, `Lapu-Lapu` and `D'Alcantara`.
const WORD: &str = r"\p{Lu}[\p{L}\p{N}'\-]*";

/// Capitalized words joined by spaces, optionally through a connector or
/// followed by a number (`San Jose del Monte`, `Barangay 171`).
fn span() -> String {
    format!(
        r"{WORD}(?:[ \t]+(?:(?:de|del|dela|la|las|los|of|y)[ \t]+)?(?:{WORD}|\d+[A-Za-z]?\b))*"
    )
}

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([\p{L}\p{N}_]+)").expect("valid regex"));

static ABBREVIATIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    TEXT_ABBREVIATIONS
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!(r"(?i)\b(?:{pattern})\b\.?")).expect("valid regex");
            (re, *replacement)
        })
        .collect()
});

static EXPLICIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:location|loc|address|addr|lugar|place)\s*(?:is\b|=|:)\s*([^\n!?;.]+)")
        .expect("valid regex")
});

static LOCATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i:\b(?:from|at|in|near|around|taga|nasa|dito[ \t]+sa|diri[ \t]+sa|galing[ \t]+sa|mula[ \t]+sa|naa[ \t]+sa|gikan[ \t]+sa|sa)(?:[ \t]+|-))({})",
        span()
    ))
    .expect("valid regex")
});

static NUMBERED_BARANGAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bbarangay[ \t]+(\d+[a-z]?)\b(?:[ \t]*,[ \t]*|[ \t]+)?(\p{L}[\p{L}'\-]*(?:[ \t]+\p{L}[\p{L}'\-]*){0,2})?",
    )
    .expect("valid regex")
});

static NAMED_BARANGAY: Lazy<Regex> = Lazy::new(|| {
    let s = span();
    Regex::new(&format!(r"(?i:\bbarangay[ \t]+)({s})(?:[ \t]*,[ \t]*({s}))?")).expect("valid regex")
});

static AREA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\p{L}[\p{L}'\-]*(?:[ \t]+\p{L}[\p{L}'\-]*)?)[ \t]+(?i:area)\b").expect("valid regex")
});

static COMMA_LIST: Lazy<Regex> = Lazy::new(|| {
    let s = span();
    Regex::new(&format!(r"{s}(?:[ \t]*,[ \t]*{s})+")).expect("valid regex")
});

static PROVINCE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({})[ \t]+(?i:province)\b", span())).expect("valid regex")
});

static PROVINCE_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i:\bprovince[ \t]+of[ \t]+)({})", span())).expect("valid regex")
});

static SEGMENT_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.,;:!?()\n]+").expect("valid regex"));

/// What kind of place a span is expected to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Barangay,
    City,
    Province,
    Area,
    Sequence,
    Location,
}

impl CandidateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateKind::Barangay => "barangay",
            CandidateKind::City => "city",
            CandidateKind::Province => "province",
            CandidateKind::Area => "area",
            CandidateKind::Sequence => "sequence",
            CandidateKind::Location => "location",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span hypothesized to name a place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub text: String,
    /// A second span used as a hint, e.g. the city after a barangay.
    pub context: Option<String>,
}

impl Candidate {
    pub fn new(kind: CandidateKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), context: None }
    }

    pub fn with_context(kind: CandidateKind, text: impl Into<String>, context: impl Into<String>) -> Self {
        Self { kind, text: text.into(), context: Some(context.into()) }
    }
}

// -----------------------------------------------------------------------------
// Preprocessing
// -----------------------------------------------------------------------------

/// Splits a hashtag body into `(prefix, place words)`.
fn split_hashtag(body: &str) -> (Option<&str>, String) {
    for prefix in HASHTAG_PREFIXES {
        let Some(head) = body.get(..prefix.len()) else { continue };
        let rest = &body[prefix.len()..];
        if head.eq_ignore_ascii_case(prefix) && rest.chars().count() >= MIN_CANDIDATE_LEN {
            return (Some(head), split_camel(rest));
        }
    }
    (None, split_camel(body))
}

fn decompose_hashtags(text: &str) -> String {
    HASHTAG
        .replace_all(text, |caps: &Captures| match split_hashtag(&caps[1]) {
            (Some(prefix), place) => format!("{prefix} {place}"),
            (None, place) => place,
        })
        .into_owned()
}

/// Expands fixed abbreviations at word boundaries, case-insensitively.
pub fn expand_abbreviations(text: &str) -> String {
    let mut out = text.to_owned();
    for (re, replacement) in ABBREVIATIONS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, *replacement).into_owned();
        }
    }
    out
}

/// Hashtag decomposition followed by abbreviation expansion.
///
/// ```rust
/// use phgeo_core::extract::preprocess;
///
/// assert_eq!(preprocess("Brgy. 171, North Caloocan."), "Barangay 171, North Caloocan.");
/// assert_eq!(preprocess("#walangpasokMarikina"), "walangpasok Marikina");
/// ```
pub fn preprocess(text: &str) -> String {
    expand_abbreviations(&decompose_hashtags(text))
}

// -----------------------------------------------------------------------------
// Extraction
// -----------------------------------------------------------------------------

fn is_edge_noise(token: &str) -> bool {
    let folded = fold_key(token);
    is_function_word(&folded) || CONNECTORS.contains(&folded.as_str())
}

/// Trims punctuation plus leading/trailing function words and connectors.
fn clean_span(span: &str) -> String {
    let tokens: Vec<&str> = span
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .collect();
    let start = tokens.iter().position(|t| !is_edge_noise(t)).unwrap_or(tokens.len());
    let end = tokens.iter().rposition(|t| !is_edge_noise(t)).map_or(start, |i| i + 1);
    tokens[start..end.max(start)].join(" ")
}

fn keep(text: &str) -> bool {
    text.chars().filter(|c| c.is_alphanumeric()).count() >= MIN_CANDIDATE_LEN
        && !is_stopword(&fold_key(text))
}

#[derive(Default)]
struct Collector {
    out: Vec<Candidate>,
}

impl Collector {
    fn push(&mut self, kind: CandidateKind, text: &str) {
        let text = clean_span(text);
        if keep(&text) {
            self.out.push(Candidate::new(kind, text));
        }
    }

    fn push_with_context(&mut self, kind: CandidateKind, text: &str, context: &str) {
        let text = clean_span(text);
        if !keep(&text) {
            return;
        }
        let context = clean_span(context);
        let candidate = if keep(&context) {
            Candidate::with_context(kind, text, context)
        } else {
            Candidate::new(kind, text)
        };
        self.out.push(candidate);
    }
}

/// Pieces of `text` between punctuation marks; names never span them.
pub(crate) fn segments(text: &str) -> impl Iterator<Item = &str> {
    SEGMENT_BREAK.split(text).filter(|s| !s.trim().is_empty())
}

fn is_lowercase_word(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word.chars().all(|c| !c.is_alphabetic() || c.is_lowercase())
}

/// Extracts every candidate span from raw text.
///
/// ```rust
/// use phgeo_core::extract::{extract, CandidateKind};
///
/// let found = extract("Taga Davao City ako");
/// assert!(found.iter().any(|c| c.kind == CandidateKind::Location && c.text == "Davao City"));
/// ```
pub fn extract(text: &str) -> Vec<Candidate> {
    let pre = preprocess(text);
    let mut c = Collector::default();

    for caps in EXPLICIT.captures_iter(&pre) {
        for part in caps[1].split(',') {
            c.push(CandidateKind::Location, part);
        }
    }

    for caps in LOCATIVE.captures_iter(&pre) {
        c.push(CandidateKind::Location, &caps[1]);
    }

    for caps in NUMBERED_BARANGAY.captures_iter(&pre) {
        let barangay = format!("Barangay {}", &caps[1]);
        match caps.get(2) {
            Some(city) => {
                c.push_with_context(CandidateKind::Barangay, &barangay, city.as_str());
                c.push(CandidateKind::City, city.as_str());
            }
            None => c.push(CandidateKind::Barangay, &barangay),
        }
    }
    for caps in NAMED_BARANGAY.captures_iter(&pre) {
        match caps.get(2) {
            Some(city) => {
                c.push_with_context(CandidateKind::Barangay, &caps[1], city.as_str());
                c.push(CandidateKind::City, city.as_str());
            }
            None => c.push(CandidateKind::Barangay, &caps[1]),
        }
    }

    for caps in AREA.captures_iter(&pre) {
        c.push(CandidateKind::Area, &caps[1]);
    }

    for m in COMMA_LIST.find_iter(&pre) {
        for part in m.as_str().split(',') {
            c.push(CandidateKind::Location, part);
        }
    }

    for segment in segments(&pre) {
        let ws = words(segment);
        for triple in ws.windows(3) {
            if triple
                .iter()
                .all(|w| is_lowercase_word(w) && !is_stopword(&fold_key(w)))
            {
                c.push(CandidateKind::Sequence, &triple.join(" "));
            }
        }
    }

    for caps in HASHTAG.captures_iter(text) {
        let (_, place) = split_hashtag(&caps[1]);
        c.push(CandidateKind::Location, &expand_abbreviations(&place));
    }

    for caps in PROVINCE_SUFFIX.captures_iter(&pre) {
        c.push(CandidateKind::Province, &caps[1]);
    }
    for caps in PROVINCE_OF.captures_iter(&pre) {
        c.push(CandidateKind::Province, &caps[1]);
    }

    c.out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(found: &[Candidate], kind: CandidateKind, text: &str) -> bool {
        found.iter().any(|c| c.kind == kind && c.text == text)
    }

    #[test]
    fn preprocessing_is_idempotent() {
        for text in [
            "Brgy. 171, North Caloocan.",
            "#BrownoutSanJoseDelMonte sa sjdm",
            "Sta. Cruz, Mla",
            "Montalban Rizal",
        ] {
            let once = preprocess(text);
            assert_eq!(preprocess(&once), once);
        }
    }

    #[test]
    fn abbreviations_expand_only_whole_words() {
        assert_eq!(preprocess("QC"), "Quezon City");
        assert_eq!(preprocess("taga sjdm"), "taga San Jose del Monte");
        assert_eq!(preprocess("Montalban Rizal"), "Rodriguez Rizal");
        assert_eq!(preprocess("Stone"), "Stone");
        assert_eq!(preprocess("Bgy. San Roque"), "Barangay San Roque");
    }

    #[test]
    fn hashtags_split_into_words() {
        assert_eq!(preprocess("#DavaoCity"), "Davao City");
        assert_eq!(preprocess("#prayforMarikina"), "prayfor Marikina");
        assert_eq!(preprocess("#baha"), "baha");
    }

    #[test]
    fn numbered_barangay_with_city() {
        let found = extract("Brgy. 171, North Caloocan.");
        assert!(found.contains(&Candidate::with_context(
            CandidateKind::Barangay,
            "Barangay 171",
            "North Caloocan"
        )));
        assert!(has(&found, CandidateKind::City, "North Caloocan"));
    }

    #[test]
    fn named_barangay_with_city() {
        let found = extract("Brgy San Roque, Marikina");
        assert!(found.contains(&Candidate::with_context(
            CandidateKind::Barangay,
            "San Roque",
            "Marikina"
        )));
        assert!(has(&found, CandidateKind::City, "Marikina"));
    }

    #[test]
    fn comma_lists_yield_each_part() {
        let found = extract("Consolacion, Cebu");
        assert!(has(&found, CandidateKind::Location, "Consolacion"));
        assert!(has(&found, CandidateKind::Location, "Cebu"));
    }

    #[test]
    fn explicit_and_locative_rules() {
        let found = extract("Location: San Roque, Marikina");
        assert!(has(&found, CandidateKind::Location, "San Roque"));
        assert!(has(&found, CandidateKind::Location, "Marikina"));

        let found = extract("brownout dito sa Cubao area");
        assert!(has(&found, CandidateKind::Location, "Cubao"));
        assert!(has(&found, CandidateKind::Area, "Cubao"));

        let found = extract("gikan sa Lahug ko");
        assert!(has(&found, CandidateKind::Location, "Lahug"));
    }

    #[test]
    fn lowercase_triples_skip_stopwords() {
        let found = extract("lubog na ang san roque marikina rizal");
        assert!(has(&found, CandidateKind::Sequence, "san roque marikina"));
        assert!(has(&found, CandidateKind::Sequence, "roque marikina rizal"));
        assert!(!found.iter().any(|c| c.text.contains("ang")));
    }

    #[test]
    fn hashtag_and_province_markers() {
        let found = extract("#walangpasokMarikina");
        assert!(has(&found, CandidateKind::Location, "Marikina"));

        let found = extract("baha sa Cebu Province at Province of Laguna");
        assert!(has(&found, CandidateKind::Province, "Cebu"));
        assert!(has(&found, CandidateKind::Province, "Laguna"));
    }

    #[test]
    fn short_and_stopword_spans_are_dropped() {
        assert!(extract("taga PLDT").iter().all(|c| c.text != "PLDT"));
        assert!(extract("Same here").is_empty());
        assert!(extract("at Ba").is_empty());
    }

    #[test]
    fn edge_function_words_are_trimmed() {
        assert_eq!(clean_span("sa Cubao"), "Cubao");
        assert_eq!(clean_span("San Jose del Monte na"), "San Jose del Monte");
        assert_eq!(clean_span("ang"), "");
    }
}
