// crates/phgeo-core/src/lexicon.rs

//! Word lists used by the extractor and the false-positive filter.
//!
//! Entries are folded lower-case (see [`crate::text::fold_key`]).

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Filipino (Tagalog and Bisaya) pronouns, particles and connectives.
pub const FUNCTION_WORDS: &[&str] = &[
    // Tagalog
    "ako", "ikaw", "ka", "siya", "sya", "kami", "tayo", "kayo", "sila", "ko", "mo", "niya", "namin",
    "natin", "ninyo", "nila", "akin", "amin", "atin", "inyo", "kanila", "ang", "ng", "nang", "mga",
    "sa", "na", "pa", "po", "opo", "ba", "naman", "lang", "lamang", "din", "rin", "daw", "raw",
    "kasi", "pero", "at", "o", "kung", "nga", "yung", "iyong", "ito", "iyan", "yan", "yun", "iyon",
    "dito", "diyan", "dyan", "doon", "don", "wala", "walang", "may", "meron", "mayroon", "hindi",
    "di", "oo", "sana", "talaga", "grabe", "ano", "bakit", "paano", "saan", "kailan",
    "sino", "nasa", "taga", "galing", "mula", "para", "pag", "kapag", "tapos", "ngayon", "bukas",
    "kahapon", "lahat", "sobra", "ulit", "pala", "eh", "ha", "si", "ni", "kay", "kina", "sina",
    "nito", "niyan", "noon", "tsaka", "saka", "habang", "dahil", "kaya", "sabi", "ganun",
    // Bisaya
    "naa", "gikan", "diri", "didto", "ani", "kaayo", "jud", "gyud", "bitaw", "unsa", "ngano",
    "asa", "karon", "dili", "kini", "kana", "ug", "og", "ta", "mi", "kamo", "ila",
    "nako", "nimo", "ato", "amo", "wa", "way", "pud", "pod", "sad", "man",
    "lagi", "gani", "diay", "nasad", "napud",
];

/// English words that collide with place names or are never places on
/// their own.
pub const COMMON_WORDS: &[&str] = &[
    "same", "here", "there", "the", "and", "for", "with", "this", "that", "these", "those", "all",
    "new", "good", "best", "more", "just", "now", "today", "tonight", "people", "power",
    "service", "internet", "signal", "down", "out", "still", "again", "please", "help", "update",
    "also", "only", "very", "free", "open", "closed", "home", "house", "work", "office", "school",
    "from", "in", "at", "near", "around", "area", "city", "province", "barangay", "town",
    "municipality", "region", "north", "south", "east", "west", "upper", "lower", "not", "yes",
    "no", "ok", "okay", "what", "when", "where", "why", "how", "who", "you", "your", "we", "our",
    "they", "their", "he", "she", "it", "its", "is", "are", "was", "were", "be", "been", "have",
    "has", "had", "do", "does", "did", "will", "would", "can", "could", "should", "my", "me",
    "us", "them", "so", "too", "but", "or", "if", "then", "than", "since", "until",
    "because", "about", "everyone", "everything", "nothing", "something", "thanks", "thank",
];

/// Place names that are also ordinary words; they only count as places
/// when the text carries location context.
pub const CONTEXT_WORDS: &[&str] = &[
    "bay", "real", "pandan", "sampaloc", "santol", "talisay", "balete", "mabini", "luna",
    "bonifacio", "victoria", "mercedes", "pilar", "looc", "bato", "ilog", "dao", "tanza",
    "baybay", "libertad", "progreso", "alegria", "esperanza", "paz", "poblacion", "buenavista",
    "concepcion", "liberty", "kalayaan", "magsaysay", "banaba", "mangga", "niog", "sapa",
];

/// Telecom, utility and platform names that show up in complaints.
pub const SERVICE_NAMES: &[&str] = &[
    "pldt", "globe", "smart", "converge", "sky", "skycable", "meralco", "maynilad", "starlink",
    "dito", "tnt", "tm", "sun", "gomo", "bayantel", "facebook", "fb", "twitter", "tiktok",
    "youtube", "gcash", "maya", "shopee", "lazada", "grab", "angkas", "netflix",
];

/// Slang and jest markers; their presence suppresses weak matches.
pub const SLANG_MARKERS: &[&str] = &[
    "af", "lol", "lmao", "lmfao", "rofl", "haha", "hahaha", "hahahaha", "hehe", "hihi", "charot",
    "char", "chz", "charr", "jk", "joke", "jowk", "sanaol", "awit", "petmalu", "lodi", "werpa",
    "ampota", "ulol", "tanga", "bobo", "xd", "emz", "eme",
];

/// Hashtag prefixes glued to a place name (`#walangpasokMarikina`).
///
/// Longer prefixes come first so the longest one is stripped.
pub const HASHTAG_PREFIXES: &[&str] = &[
    "walangpasok", "nointernet", "brownout", "trending", "prayfor", "outage", "signal",
    "pray4", "floods", "flood", "trend", "baha",
];

/// Country markers that raise confidence a little.
pub const COUNTRY_MARKERS: &[&str] = &["philippines", "pilipinas", "pinas", "ph", "phl"];

static FUNCTION_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| FUNCTION_WORDS.iter().copied().collect());
static COMMON_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| COMMON_WORDS.iter().copied().collect());
static CONTEXT_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| CONTEXT_WORDS.iter().copied().collect());
static SERVICE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| SERVICE_NAMES.iter().copied().collect());
static SLANG_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| SLANG_MARKERS.iter().copied().collect());

pub fn is_function_word(folded: &str) -> bool {
    FUNCTION_SET.contains(folded)
}

pub fn is_common_word(folded: &str) -> bool {
    COMMON_SET.contains(folded)
}

pub fn is_context_word(folded: &str) -> bool {
    CONTEXT_SET.contains(folded)
}

pub fn is_service_name(folded: &str) -> bool {
    SERVICE_SET.contains(folded)
}

pub fn is_slang_marker(folded: &str) -> bool {
    SLANG_SET.contains(folded)
}

/// Stopword check used at extraction time: function words and service names.
pub fn is_stopword(folded: &str) -> bool {
    is_function_word(folded) || is_service_name(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_lower_case() {
        for w in FUNCTION_WORDS
            .iter()
            .chain(COMMON_WORDS)
            .chain(CONTEXT_WORDS)
            .chain(SERVICE_NAMES)
            .chain(SLANG_MARKERS)
            .chain(HASHTAG_PREFIXES)
        {
            assert_eq!(w.to_lowercase(), *w);
        }
    }

    #[test]
    fn hashtag_prefixes_longest_first_where_nested() {
        let pos = |p: &str| HASHTAG_PREFIXES.iter().position(|x| *x == p).unwrap();
        assert!(pos("trending") < pos("trend"));
        assert!(pos("floods") < pos("flood"));
    }

    #[test]
    fn stopwords_cover_services() {
        assert!(is_stopword("pldt"));
        assert!(is_stopword("ako"));
        assert!(!is_stopword("marikina"));
    }
}
