// crates/phgeo-core/src/text.rs

//! # Normalizer
//!
//! Canonicalizes place names and free text into lookup keys. Every other
//! component goes through these functions, so the dataset side and the text
//! side of a lookup always agree on what "the same name" means.

use crate::alias::expand_honorific;

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Dasmariñas` -> `Dasmarinas`)
/// 2\) Normalize to lowercase
///
/// ```rust
/// use phgeo_core::text::fold_key;
///
/// assert_eq!(fold_key("Parañaque"), "paranaque");
/// assert_eq!(fold_key("SANTO NIÑO"), "santo nino");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Builds the NormalizedKey of a place name.
///
/// Steps, in order:
/// - fold diacritics and case ([`fold_key`])
/// - drop parenthetical notes (`"Rodriguez (Montalban)"` -> `"Rodriguez"`)
/// - collapse every non-alphanumeric run into a single space
/// - expand abbreviated honorifics (`sto` -> `santo`)
/// - strip `Barangay`/`Brgy.` and `City of`/`Municipality of` prefixes
///
/// The result is idempotent: `normalize_key(&normalize_key(x)) == normalize_key(x)`.
///
/// ```rust
/// use phgeo_core::text::normalize_key;
///
/// assert_eq!(normalize_key("CITY OF MALOLOS (Capital)"), "malolos");
/// assert_eq!(normalize_key("Brgy. 171"), "171");
/// assert_eq!(normalize_key("Sto. Niño"), "santo nino");
/// ```
pub fn normalize_key(name: &str) -> String {
    let folded = fold_key(name);
    let without_notes = strip_parentheticals(&folded);

    let mut tokens: Vec<&str> = without_notes
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| expand_honorific(t).unwrap_or(t))
        .collect();

    loop {
        let prefix_len = match tokens.as_slice() {
            ["barangay" | "brgy" | "bgy" | "brg", rest @ ..] if !rest.is_empty() => 1,
            ["city" | "municipality", "of", rest @ ..] if !rest.is_empty() => 2,
            _ => 0,
        };
        if prefix_len == 0 {
            break;
        }
        tokens.drain(..prefix_len);
    }

    tokens.join(" ")
}

/// Removes `( ... )` spans. An unbalanced `(` drops the rest of the string.
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Word tokens of a text span, keeping inner apostrophes and hyphens.
///
/// Leading/trailing punctuation is dropped; `"Caloocan."` yields `"Caloocan"`.
pub fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '!' | '?' | '"' | '(' | ')'))
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Contiguous word windows of `text` up to `max_len` words, longest first,
/// left to right.
///
/// ```rust
/// use phgeo_core::text::windows;
///
/// assert_eq!(
///     windows("San Roque Marikina", 4),
///     vec!["San Roque Marikina", "San Roque", "Roque Marikina", "San", "Roque", "Marikina"]
/// );
/// assert_eq!(windows("San Roque Marikina", 1), vec!["San", "Roque", "Marikina"]);
/// ```
pub fn windows(text: &str, max_len: usize) -> Vec<String> {
    let ws = words(text);
    let mut out = Vec::new();
    for len in (1..=max_len.min(ws.len())).rev() {
        for start in 0..=(ws.len() - len) {
            out.push(ws[start..start + len].join(" "));
        }
    }
    out
}

/// [`windows`] under a longest-match rule: once a window satisfies `hit`,
/// the shorter windows lying inside it are skipped. Each kept window comes
/// with whether it hit.
///
/// ```rust
/// use phgeo_core::text::longest_windows;
///
/// let kept = longest_windows("Davao del Norte", 4, |w| w == "Davao del Norte" || w == "Davao");
/// assert_eq!(kept, vec![("Davao del Norte".to_string(), true)]);
/// ```
pub fn longest_windows(text: &str, max_len: usize, hit: impl Fn(&str) -> bool) -> Vec<(String, bool)> {
    let ws = words(text);
    let mut matched: Vec<(usize, usize)> = Vec::new();
    let mut out = Vec::new();
    for len in (1..=max_len.min(ws.len())).rev() {
        for start in 0..=(ws.len() - len) {
            let end = start + len;
            if matched.iter().any(|&(s, e)| s <= start && end <= e) {
                continue;
            }
            let w = ws[start..end].join(" ");
            let is_hit = hit(&w);
            if is_hit {
                matched.push((start, end));
            }
            out.push((w, is_hit));
        }
    }
    out
}

/// Splits a hashtag body on case and letter/digit boundaries.
///
/// ```rust
/// use phgeo_core::text::split_camel;
///
/// assert_eq!(split_camel("DavaoCity"), "Davao City");
/// assert_eq!(split_camel("NCRFloods"), "NCR Floods");
/// assert_eq!(split_camel("Barangay171"), "Barangay 171");
/// ```
pub fn split_camel(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()))
                || (prev.is_alphabetic() && c.is_ascii_digit())
                || (prev.is_ascii_digit() && c.is_alphabetic());
            if boundary {
                out.push(' ');
            }
        }
        if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Words kept lower-case inside a display name (unless first).
const CONNECTORS: &[&str] = &["de", "del", "dela", "la", "las", "los", "of", "y", "ng", "sa"];

const ROMAN: &[&str] = &[
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII",
];

/// Returns `true` when the name has letters and none of them are lower-case.
pub fn is_all_caps(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}

/// Converts an ALL-CAPS dataset name into display case.
///
/// Connectors stay lower-case, roman numerals and short parenthetical
/// acronyms stay upper-case.
///
/// ```rust
/// use phgeo_core::text::title_case;
///
/// assert_eq!(title_case("DAVAO DEL SUR"), "Davao del Sur");
/// assert_eq!(title_case("REGION IV-A (CALABARZON)"), "Region IV-A (Calabarzon)");
/// assert_eq!(title_case("NATIONAL CAPITAL REGION (NCR)"), "National Capital Region (NCR)");
/// ```
pub fn title_case(name: &str) -> String {
    let mut in_parens = false;
    name.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if word.starts_with('(') {
                in_parens = true;
            }
            let styled = word
                .split('-')
                .map(|part| style_part(part, i == 0, in_parens))
                .collect::<Vec<_>>()
                .join("-");
            if word.ends_with(')') {
                in_parens = false;
            }
            styled
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn style_part(part: &str, first: bool, in_parens: bool) -> String {
    let core: String = part.chars().filter(|c| c.is_alphanumeric()).collect();
    let upper = core.to_uppercase();
    if ROMAN.contains(&upper.as_str()) || (in_parens && !core.is_empty() && core.chars().count() <= 4) {
        return part.to_uppercase();
    }
    let lower = part.to_lowercase();
    if !first && CONNECTORS.contains(&core.to_lowercase().as_str()) {
        return lower;
    }
    let mut out = String::with_capacity(lower.len());
    let mut capitalized = false;
    for c in lower.chars() {
        if !capitalized && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalized = true;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_prefixes_and_notes() {
        assert_eq!(normalize_key("City of Caloocan"), "caloocan");
        assert_eq!(normalize_key("MUNICIPALITY OF PATEROS"), "pateros");
        assert_eq!(normalize_key("Barangay 171"), "171");
        assert_eq!(normalize_key("bgy. San Roque"), "san roque");
        assert_eq!(normalize_key("RODRIGUEZ (MONTALBAN)"), "rodriguez");
        assert_eq!(normalize_key("  Lapu-Lapu   City "), "lapu lapu city");
    }

    #[test]
    fn normalize_keeps_bare_prefix_words() {
        assert_eq!(normalize_key("Barangay"), "barangay");
        assert_eq!(normalize_key("City of"), "city of");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Barangay Barangay 5",
            "City of Municipality of X",
            "Sto. Niño (Pob.)",
            "SAN JOSE DEL MONTE",
            "Brgy. 171, North Caloocan.",
            "Dasmariñas",
            "((unbalanced",
        ];
        for s in samples {
            let once = normalize_key(s);
            assert_eq!(normalize_key(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn windows_of_single_word() {
        assert_eq!(windows("Cebu.", 4), vec!["Cebu"]);
        assert!(windows("  ", 4).is_empty());
    }

    #[test]
    fn longest_windows_keep_misses_outside_hits() {
        let kept = longest_windows("San Roque Marikina", 4, |w| w == "San Roque" || w == "Marikina");
        let texts: Vec<&str> = kept.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(texts, vec!["San Roque Marikina", "San Roque", "Roque Marikina", "Marikina"]);
        assert_eq!(kept.iter().filter(|(_, hit)| *hit).count(), 2);
    }

    #[test]
    fn words_drop_edge_punctuation() {
        assert_eq!(words("Brgy. 171, North Caloocan."), vec!["Brgy", "171", "North", "Caloocan"]);
    }

    #[test]
    fn title_case_keeps_connectors_lower() {
        assert_eq!(title_case("CAGAYAN DE ORO"), "Cagayan de Oro");
        assert_eq!(title_case("LAPU-LAPU"), "Lapu-Lapu");
        assert_eq!(title_case("ADAMS (POB.)"), "Adams (POB.)");
        assert_eq!(title_case("BARANGAY 171"), "Barangay 171");
    }

    #[test]
    fn all_caps_detection() {
        assert!(is_all_caps("CITY OF MALOLOS"));
        assert!(!is_all_caps("City of Malolos"));
        assert!(!is_all_caps("171"));
    }
}
