// crates/phgeo-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used for an empty level in a [`LocationMatch`].
pub const NONE: &str = "None";

/// One level of the Philippine administrative hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Region,
    Province,
    City,
    Barangay,
}

impl Level {
    /// Higher is more specific.
    pub fn specificity(self) -> u8 {
        match self {
            Level::Region => 0,
            Level::Province => 1,
            Level::City => 2,
            Level::Barangay => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Region => "region",
            Level::Province => "province",
            Level::City => "city",
            Level::Barangay => "barangay",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the administrative hierarchy.
///
/// Only `region` is mandatory; a unit is as specific as its deepest set
/// field. Units are loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminUnit {
    pub region: String,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub barangay: Option<String>,
}

impl AdminUnit {
    pub fn new(
        region: impl Into<String>,
        province: Option<&str>,
        city: Option<&str>,
        barangay: Option<&str>,
    ) -> Self {
        Self {
            region: region.into(),
            province: province.map(str::to_owned),
            city: city.map(str::to_owned),
            barangay: barangay.map(str::to_owned),
        }
    }

    /// The most specific level this unit describes.
    pub fn level(&self) -> Level {
        if self.barangay.is_some() {
            Level::Barangay
        } else if self.city.is_some() {
            Level::City
        } else if self.province.is_some() {
            Level::Province
        } else {
            Level::Region
        }
    }

    /// A copy of this unit cut down to `level`.
    pub fn truncated(&self, level: Level) -> AdminUnit {
        AdminUnit {
            region: self.region.clone(),
            province: (level >= Level::Province).then(|| self.province.clone()).flatten(),
            city: (level >= Level::City).then(|| self.city.clone()).flatten(),
            barangay: (level >= Level::Barangay).then(|| self.barangay.clone()).flatten(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn barangay(&self) -> Option<&str> {
        self.barangay.as_deref()
    }
}

/// The resolver's answer for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub region: String,
    pub province: String,
    pub city: String,
    pub barangay: String,
    /// Normalized score in `0.0..=1.0`.
    pub confidence: f64,
}

impl LocationMatch {
    pub fn from_unit(unit: &AdminUnit, confidence: f64) -> Self {
        let or_none = |v: Option<&str>| v.unwrap_or(NONE).to_owned();
        Self {
            region: unit.region.clone(),
            province: or_none(unit.province()),
            city: or_none(unit.city()),
            barangay: or_none(unit.barangay()),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn has_province(&self) -> bool {
        self.province != NONE
    }

    pub fn has_city(&self) -> bool {
        self.city != NONE
    }

    pub fn has_barangay(&self) -> bool {
        self.barangay != NONE
    }

    /// The most specific populated level.
    pub fn level(&self) -> Level {
        if self.has_barangay() {
            Level::Barangay
        } else if self.has_city() {
            Level::City
        } else if self.has_province() {
            Level::Province
        } else {
            Level::Region
        }
    }
}

impl fmt::Display for LocationMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region: {}, Province: {}, City: {}, Barangay: {} (confidence {:.2})",
            self.region, self.province, self.city, self.barangay, self.confidence
        )
    }
}

/// Simple aggregate statistics for the gazetteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub regions: usize,
    pub provinces: usize,
    pub cities: usize,
    pub barangays: usize,
    pub ambiguous_cities: usize,
    pub ambiguous_barangays: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> AdminUnit {
        AdminUnit::new("NCR", Some("Metro Manila"), Some("City of Marikina"), Some("San Roque"))
    }

    #[test]
    fn truncation_follows_levels() {
        let u = unit();
        assert_eq!(u.level(), Level::Barangay);
        let city = u.truncated(Level::City);
        assert_eq!(city.level(), Level::City);
        assert_eq!(city.barangay, None);
        assert_eq!(u.truncated(Level::Region).province, None);
    }

    #[test]
    fn match_uses_none_sentinel() {
        let m = LocationMatch::from_unit(&unit().truncated(Level::Province), 1.4);
        assert_eq!(m.city, NONE);
        assert_eq!(m.barangay, NONE);
        assert_eq!(m.confidence, 1.0);
        assert_eq!(m.level(), Level::Province);
        assert_eq!(
            m.to_string(),
            "Region: NCR, Province: Metro Manila, City: None, Barangay: None (confidence 1.00)"
        );
    }
}
