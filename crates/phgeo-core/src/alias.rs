// crates/phgeo-core/src/alias.rs

//! # Alias Tables
//!
//! Nicknames, short codes and renamed places, kept as plain data so every
//! rule is auditable in one place. Keys on both sides are already in
//! NormalizedKey form (see [`crate::text::normalize_key`]).
//!
//! - [`CITY_ALIASES`] and [`PROVINCE_ALIASES`] / [`REGION_ALIASES`] are folded
//!   into the gazetteer tables at build time.
//! - [`CITY_PRIORITY`] is the explicit tie-break for a handful of city names
//!   that exist in several provinces; consulted only when no hint is given.
//! - [`TEXT_ABBREVIATIONS`] is applied to raw text before extraction.
//! - [`HONORIFICS`] expands abbreviated Spanish honorifics inside keys.

/// `(alias, canonical city key)`.
pub const CITY_ALIASES: &[(&str, &str)] = &[
    ("qc", "quezon city"),
    ("kyusi", "quezon city"),
    ("north caloocan", "caloocan"),
    ("south caloocan", "caloocan"),
    ("montalban", "rodriguez"),
    ("sjdm", "san jose del monte"),
    ("cdo", "cagayan de oro"),
    ("gensan", "general santos"),
    ("mla", "manila"),
    ("dgte", "dumaguete"),
    ("lapulapu", "lapu lapu"),
];

/// `(alias, canonical province key)`.
pub const PROVINCE_ALIASES: &[(&str, &str)] = &[
    ("ncr", "metro manila"),
    ("mm", "metro manila"),
    ("kamaynilaan", "metro manila"),
    ("mt province", "mountain province"),
];

/// `(alias, canonical region key)`.
pub const REGION_ALIASES: &[(&str, &str)] = &[
    ("ncr", "national capital region"),
    ("metro manila", "national capital region"),
    ("car", "cordillera administrative region"),
    ("central luzon", "region iii"),
    ("calabarzon", "region iv a"),
    ("mimaropa", "region iv b"),
    ("central visayas", "region vii"),
    ("davao region", "region xi"),
];

/// A fixed preference for a city name shared by several provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityPriority {
    /// Ambiguous lookup key as typed by users.
    pub name: &'static str,
    /// City key of the preferred unit.
    pub city: &'static str,
    /// Province key of the preferred unit.
    pub province: &'static str,
}

/// Metro-area interpretations win when nothing else in the text decides.
pub const CITY_PRIORITY: &[CityPriority] = &[
    CityPriority { name: "quezon", city: "quezon city", province: "metro manila" },
    CityPriority { name: "san fernando", city: "san fernando", province: "pampanga" },
    CityPriority { name: "naga", city: "naga", province: "camarines sur" },
    CityPriority { name: "santa rosa", city: "santa rosa", province: "laguna" },
    CityPriority { name: "san pablo", city: "san pablo", province: "laguna" },
];

/// Looks up the priority entry for an ambiguous city key.
pub fn city_priority(key: &str) -> Option<&'static CityPriority> {
    CITY_PRIORITY.iter().find(|p| p.name == key)
}

/// `(case-insensitive word pattern, replacement)` applied to raw text.
///
/// Patterns are regex fragments matched at word boundaries; an optional
/// trailing period is consumed with the abbreviation.
pub const TEXT_ABBREVIATIONS: &[(&str, &str)] = &[
    (r"brgy|bgy|brg|bgry", "Barangay"),
    (r"qc", "Quezon City"),
    (r"cdo", "Cagayan de Oro"),
    (r"gensan", "General Santos"),
    (r"sjdm", "San Jose del Monte"),
    (r"montalban", "Rodriguez"),
    (r"sto", "Santo"),
    (r"sta", "Santa"),
    (r"mla", "Manila"),
];

/// Abbreviated honorific → elongated form, applied token-wise inside keys.
pub const HONORIFICS: &[(&str, &str)] = &[("sto", "santo"), ("sta", "santa"), ("sn", "san")];

/// Returns the elongated honorific for a key token, if any.
pub fn expand_honorific(token: &str) -> Option<&'static str> {
    HONORIFICS
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, long)| *long)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize_key;

    #[test]
    fn alias_keys_are_normalized() {
        for (alias, target) in CITY_ALIASES
            .iter()
            .chain(PROVINCE_ALIASES)
            .chain(REGION_ALIASES)
        {
            assert_eq!(normalize_key(alias), *alias, "alias {alias}");
            assert_eq!(normalize_key(target), *target, "target {target}");
        }
    }

    #[test]
    fn priority_lookup() {
        let p = city_priority("quezon").unwrap();
        assert_eq!(p.city, "quezon city");
        assert!(city_priority("caloocan").is_none());
    }

    #[test]
    fn honorifics_expand() {
        assert_eq!(expand_honorific("sto"), Some("santo"));
        assert_eq!(expand_honorific("santo"), None);
    }
}
