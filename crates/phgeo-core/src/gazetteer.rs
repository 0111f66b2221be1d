// crates/phgeo-core/src/gazetteer.rs

//! # Gazetteer Index
//!
//! A flat, read-only index over every administrative unit.
//!
//! **Structure:** all units live in one contiguous `Vec<AdminUnit>`; the four
//! name tables (region, province, city, barangay) map a NormalizedKey to the
//! ids of the units sharing it, in dataset order. A key with more than one
//! id is ambiguous at that level. Ambiguous city and barangay keys are
//! collected once at build time.
//!
//! Aliases from [`crate::alias`] are folded into the tables during the build,
//! so `"qc"` and `"quezon city"` are indistinguishable to callers.

use crate::alias::{city_priority, CITY_ALIASES, PROVINCE_ALIASES, REGION_ALIASES};
use crate::error::{GeoError, Result};
use crate::model::{AdminUnit, DbStats, Level, LocationMatch, NONE};
use crate::text::normalize_key;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type UnitId = u32;

type NameTable = HashMap<String, Vec<UnitId>>;

/// Normalized keys of one unit; empty strings stand for absent levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) struct UnitKeys {
    pub region: String,
    pub province: String,
    pub city: String,
    pub barangay: String,
}

impl UnitKeys {
    fn of(unit: &AdminUnit) -> Self {
        let key = |v: Option<&str>| v.map(normalize_key).unwrap_or_default();
        Self {
            region: normalize_key(&unit.region),
            province: key(unit.province()),
            city: key(unit.city()),
            barangay: key(unit.barangay()),
        }
    }
}

/// The master index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Gazetteer {
    units: Vec<AdminUnit>,
    keys: Vec<UnitKeys>,
    regions: NameTable,
    provinces: NameTable,
    cities: NameTable,
    barangays: NameTable,
    ambiguous_cities: HashSet<String>,
    ambiguous_barangays: HashSet<String>,
}

impl Gazetteer {
    /// Builds the index from dataset rows.
    ///
    /// Fails on an empty dataset or on any row that skips a required level
    /// (a barangay without a city, a city without a province, an empty
    /// region) or whose names normalize to nothing. No partial index is
    /// ever returned.
    pub fn build(rows: Vec<AdminUnit>) -> Result<Self> {
        if rows.is_empty() {
            return Err(GeoError::EmptyDataset);
        }

        let mut builder = IndexBuilder::default();
        for (row_no, row) in rows.into_iter().enumerate() {
            validate_row(row_no, &row)?;
            builder.add(row);
        }
        let gazetteer = builder.finish();

        tracing::info!(
            regions = gazetteer.regions.len(),
            provinces = gazetteer.provinces.len(),
            cities = gazetteer.cities.len(),
            barangays = gazetteer.barangays.len(),
            "gazetteer index built"
        );
        Ok(gazetteer)
    }

    // -----------------------------------------------------------------------
    // Public lookups
    // -----------------------------------------------------------------------

    /// Looks up a barangay by name.
    ///
    /// A unique name returns its unit. An ambiguous name needs a hint: the
    /// first unit whose city (else province) matches the hint is returned.
    /// Without a usable hint the lookup returns `None` rather than guessing.
    pub fn find_barangay(
        &self,
        name: &str,
        city_hint: Option<&str>,
        province_hint: Option<&str>,
    ) -> Option<&AdminUnit> {
        self.barangay_id(name, city_hint, province_hint)
            .map(|id| self.unit(id))
    }

    /// Looks up a city or municipality by name.
    ///
    /// Tries the name as given, then with and without a trailing "City".
    /// Ambiguous names are settled by the province hint, or, when there is
    /// no hint at all, by the fixed priority table in [`crate::alias`].
    pub fn find_city(&self, name: &str, province_hint: Option<&str>) -> Option<&AdminUnit> {
        self.city_id(name, province_hint).map(|id| self.unit(id))
    }

    pub fn find_province(&self, name: &str) -> Option<&AdminUnit> {
        self.province_id(name).map(|id| self.unit(id))
    }

    pub fn find_region(&self, name: &str) -> Option<&AdminUnit> {
        unique(&self.regions, &normalize_key(name)).map(|id| self.unit(id))
    }

    pub fn is_ambiguous_barangay(&self, name: &str) -> bool {
        self.ambiguous_barangays.contains(&normalize_key(name))
    }

    pub fn is_ambiguous_city(&self, name: &str) -> bool {
        city_variants(&normalize_key(name))
            .iter()
            .find(|v| self.cities.contains_key(*v))
            .is_some_and(|v| self.ambiguous_cities.contains(v))
    }

    /// Every barangay unit sharing `name`, in dataset order.
    pub fn barangays_named(&self, name: &str) -> Vec<&AdminUnit> {
        self.all(&self.barangays, &normalize_key(name))
    }

    /// Every city unit sharing `name` (aliases included), in dataset order.
    pub fn cities_named(&self, name: &str) -> Vec<&AdminUnit> {
        self.all(&self.cities, &normalize_key(name))
    }

    /// `true` when the gazetteer has a city named `city` inside `province`.
    pub fn city_in_province(&self, city: &str, province: &str) -> bool {
        let province = normalize_key(province);
        self.cities
            .get(&normalize_key(city))
            .is_some_and(|ids| ids.iter().any(|&id| self.keys(id).province == province))
    }

    /// `true` when the gazetteer has barangay `barangay` in `city`, `province`.
    pub fn barangay_in_city(&self, barangay: &str, city: &str, province: &str) -> bool {
        let (city, province) = (normalize_key(city), normalize_key(province));
        self.barangays.get(&normalize_key(barangay)).is_some_and(|ids| {
            ids.iter().any(|&id| {
                let k = self.keys(id);
                k.city == city && k.province == province
            })
        })
    }

    /// Re-validates a match against the hierarchy and clears inconsistent
    /// levels: a barangay not in its city, a city not in its province.
    ///
    /// Returns `false` when nothing usable (no province) is left.
    pub fn demote_inconsistent(&self, m: &mut LocationMatch) -> bool {
        if m.has_city() && !(m.has_province() && self.city_in_province(&m.city, &m.province)) {
            tracing::debug!(city = %m.city, province = %m.province, "dropping city outside province");
            m.city = NONE.to_owned();
            m.barangay = NONE.to_owned();
        }
        if m.has_barangay() && !self.barangay_in_city(&m.barangay, &m.city, &m.province) {
            tracing::debug!(barangay = %m.barangay, city = %m.city, "dropping barangay outside city");
            m.barangay = NONE.to_owned();
        }
        m.has_province()
    }

    pub fn stats(&self) -> DbStats {
        let count = |level: Level| self.units.iter().filter(|u| u.level() == level).count();
        DbStats {
            regions: count(Level::Region),
            provinces: count(Level::Province),
            cities: count(Level::City),
            barangays: count(Level::Barangay),
            ambiguous_cities: self.ambiguous_cities.len(),
            ambiguous_barangays: self.ambiguous_barangays.len(),
        }
    }

    /// All units, in build order.
    pub fn units(&self) -> &[AdminUnit] {
        &self.units
    }

    // -----------------------------------------------------------------------
    // Id-level lookups (used by the resolver)
    // -----------------------------------------------------------------------

    pub fn unit(&self, id: UnitId) -> &AdminUnit {
        &self.units[id as usize]
    }

    pub(crate) fn keys(&self, id: UnitId) -> &UnitKeys {
        &self.keys[id as usize]
    }

    /// `true` when `key` (already normalized) names anything at any level.
    pub(crate) fn knows_key(&self, key: &str) -> bool {
        self.barangays.contains_key(key)
            || self.provinces.contains_key(key)
            || self.regions.contains_key(key)
            || city_variants(key).iter().any(|v| self.cities.contains_key(v))
    }

    pub(crate) fn barangay_id(
        &self,
        name: &str,
        city_hint: Option<&str>,
        province_hint: Option<&str>,
    ) -> Option<UnitId> {
        let ids = self.barangays.get(&normalize_key(name))?;
        if let [only] = ids.as_slice() {
            return Some(*only);
        }
        if let Some(hint) = city_hint {
            let wanted = self.city_hint_keys(hint);
            if let Some(&id) = ids.iter().find(|&&id| wanted.contains(&self.keys(id).city)) {
                return Some(id);
            }
        }
        if let Some(hint) = province_hint {
            let wanted = self.province_hint_keys(hint);
            if let Some(&id) = ids.iter().find(|&&id| wanted.contains(&self.keys(id).province)) {
                return Some(id);
            }
        }
        None
    }

    /// Like [`barangay_id`](Self::barangay_id), but a province hint only
    /// settles an ambiguous name when a single unit of that name lies inside
    /// the province.
    pub(crate) fn barangay_id_strict(
        &self,
        name: &str,
        city_hint: Option<&str>,
        province_hint: Option<&str>,
    ) -> Option<UnitId> {
        if let Some(id) = self.barangay_id(name, city_hint, None) {
            return Some(id);
        }
        let ids = self.barangays.get(&normalize_key(name))?;
        let wanted = self.province_hint_keys(province_hint?);
        let mut inside = ids
            .iter()
            .copied()
            .filter(|&id| wanted.contains(&self.keys(id).province));
        match (inside.next(), inside.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn city_id(&self, name: &str, province_hint: Option<&str>) -> Option<UnitId> {
        let key = normalize_key(name);
        for variant in city_variants(&key) {
            let Some(ids) = self.cities.get(&variant) else {
                continue;
            };
            if let [only] = ids.as_slice() {
                return Some(*only);
            }
            // Ambiguous: decide here, never fall through to looser variants.
            return match province_hint {
                Some(hint) => {
                    let wanted = self.province_hint_keys(hint);
                    ids.iter()
                        .copied()
                        .find(|&id| wanted.contains(&self.keys(id).province))
                }
                None => city_priority(&variant).and_then(|p| {
                    self.cities.get(p.city)?.iter().copied().find(|&id| {
                        let k = self.keys(id);
                        k.city == p.city && k.province == p.province
                    })
                }),
            };
        }
        None
    }

    pub(crate) fn province_id(&self, name: &str) -> Option<UnitId> {
        let key = normalize_key(name);
        unique(&self.provinces, &key).or_else(|| {
            key.strip_suffix(" province")
                .and_then(|bare| unique(&self.provinces, bare))
        })
    }

    /// City keys a hint can stand for; aliases resolve to their targets.
    fn city_hint_keys(&self, hint: &str) -> Vec<String> {
        let key = normalize_key(hint);
        let resolved: Vec<String> = city_variants(&key)
            .iter()
            .filter_map(|v| self.cities.get(v))
            .flatten()
            .map(|&id| self.keys(id).city.clone())
            .collect();
        if resolved.is_empty() {
            vec![key]
        } else {
            resolved
        }
    }

    fn province_hint_keys(&self, hint: &str) -> Vec<String> {
        let key = normalize_key(hint);
        match self.provinces.get(&key) {
            Some(ids) => ids.iter().map(|&id| self.keys(id).province.clone()).collect(),
            None => vec![key],
        }
    }

    /// `true` when `hint` names the city of unit `id`, aliases included.
    pub(crate) fn hint_names_city(&self, hint: &str, id: UnitId) -> bool {
        let k = self.keys(id);
        !k.city.is_empty() && self.city_hint_keys(hint).contains(&k.city)
    }

    pub(crate) fn hint_names_province(&self, hint: &str, id: UnitId) -> bool {
        let k = self.keys(id);
        !k.province.is_empty() && self.province_hint_keys(hint).contains(&k.province)
    }

    fn all(&self, table: &NameTable, key: &str) -> Vec<&AdminUnit> {
        table
            .get(key)
            .map(|ids| ids.iter().map(|&id| self.unit(id)).collect())
            .unwrap_or_default()
    }
}

/// `key`, then `key + " city"`, then `key` without a trailing `" city"`.
fn city_variants(key: &str) -> Vec<String> {
    let mut out = vec![key.to_owned()];
    match key.strip_suffix(" city") {
        Some(bare) if !bare.is_empty() => out.push(bare.to_owned()),
        _ if !key.is_empty() => out.push(format!("{key} city")),
        _ => {}
    }
    out
}

fn unique(table: &NameTable, key: &str) -> Option<UnitId> {
    match table.get(key).map(Vec::as_slice) {
        Some([only]) => Some(*only),
        _ => None,
    }
}

fn validate_row(row_no: usize, row: &AdminUnit) -> Result<()> {
    let malformed = |reason: &str| GeoError::Malformed {
        row: row_no,
        reason: reason.to_owned(),
    };
    let blank = |v: Option<&str>| v.is_some_and(|s| normalize_key(s).is_empty());

    if normalize_key(&row.region).is_empty() {
        return Err(malformed("missing region"));
    }
    if blank(row.province()) || blank(row.city()) || blank(row.barangay()) {
        return Err(malformed("name normalizes to an empty key"));
    }
    if row.barangay.is_some() && row.city.is_none() {
        return Err(malformed("barangay without city"));
    }
    if row.city.is_some() && row.province.is_none() {
        return Err(malformed("city without province"));
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// BUILDER
// -----------------------------------------------------------------------------

#[derive(Default)]
struct IndexBuilder {
    units: Vec<AdminUnit>,
    keys: Vec<UnitKeys>,
    seen: HashMap<UnitKeys, UnitId>,
    regions: NameTable,
    provinces: NameTable,
    cities: NameTable,
    barangays: NameTable,
}

impl IndexBuilder {
    /// Registers the row and every ancestor level it implies.
    fn add(&mut self, row: AdminUnit) {
        let level = row.level();
        for ancestor in [Level::Region, Level::Province, Level::City] {
            if ancestor < level {
                self.ensure(row.truncated(ancestor));
            }
        }
        self.ensure(row);
    }

    fn ensure(&mut self, unit: AdminUnit) -> UnitId {
        let keys = UnitKeys::of(&unit);
        if let Some(&id) = self.seen.get(&keys) {
            return id;
        }
        let id = self.units.len() as UnitId;
        let (table, key) = match unit.level() {
            Level::Region => (&mut self.regions, keys.region.clone()),
            Level::Province => (&mut self.provinces, keys.province.clone()),
            Level::City => (&mut self.cities, keys.city.clone()),
            Level::Barangay => (&mut self.barangays, keys.barangay.clone()),
        };
        table.entry(key).or_default().push(id);
        self.seen.insert(keys.clone(), id);
        self.keys.push(keys);
        self.units.push(unit);
        id
    }

    fn finish(mut self) -> Gazetteer {
        fold_aliases(&mut self.cities, CITY_ALIASES);
        fold_aliases(&mut self.provinces, PROVINCE_ALIASES);
        fold_aliases(&mut self.regions, REGION_ALIASES);

        let ambiguous = |table: &NameTable| -> HashSet<String> {
            table
                .iter()
                .filter(|(_, ids)| ids.len() > 1)
                .map(|(k, _)| k.clone())
                .collect()
        };

        Gazetteer {
            ambiguous_cities: ambiguous(&self.cities),
            ambiguous_barangays: ambiguous(&self.barangays),
            units: self.units,
            keys: self.keys,
            regions: self.regions,
            provinces: self.provinces,
            cities: self.cities,
            barangays: self.barangays,
        }
    }
}

/// Points each alias at its target's ids. Real names are never shadowed,
/// and aliases whose target is absent from the dataset are skipped.
fn fold_aliases(table: &mut NameTable, aliases: &[(&str, &str)]) {
    for (alias, target) in aliases {
        if table.contains_key(*alias) {
            continue;
        }
        let target_ids = table.get(*target).cloned().or_else(|| {
            city_variants(target)
                .into_iter()
                .find_map(|v| table.get(&v).cloned())
        });
        if let Some(ids) = target_ids {
            table.insert((*alias).to_owned(), ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(r: &str, p: &str, c: &str, b: &str) -> AdminUnit {
        fn opt(s: &str) -> Option<&str> {
            (!s.is_empty()).then_some(s)
        }
        AdminUnit::new(r, opt(p), opt(c), opt(b))
    }

    fn sample() -> Gazetteer {
        Gazetteer::build(vec![
            row("NCR", "Metro Manila", "City of Marikina", "San Roque"),
            row("NCR", "Metro Manila", "City of Marikina", "Tumana"),
            row("NCR", "Metro Manila", "Quezon City", "San Roque"),
            row("NCR", "Metro Manila", "City of Caloocan", "Barangay 171"),
            row("NCR", "Metro Manila", "City of Manila", "Barangay 171"),
            row("Region IV-A", "Quezon", "Quezon", "Poblacion"),
            row("Region X", "Bukidnon", "Quezon", "Poblacion"),
            row("Region IV-A", "Rizal", "Rodriguez (Montalban)", "San Jose"),
            row("Region IV-A", "Laguna", "Rizal", ""),
            row("Region IV-B", "Palawan", "Rizal", ""),
            row("Region XI", "Davao del Sur", "Davao City", "Talomo"),
        ])
        .unwrap()
    }

    #[test]
    fn unique_barangay_needs_no_hint() {
        let g = sample();
        let u = g.find_barangay("tumana", None, None).unwrap();
        assert_eq!(u.city.as_deref(), Some("City of Marikina"));
    }

    #[test]
    fn ambiguous_barangay_without_hint_is_none() {
        let g = sample();
        assert!(g.is_ambiguous_barangay("San Roque"));
        assert!(g.find_barangay("San Roque", None, None).is_none());
        assert!(g.find_barangay("San Roque", Some("Pasig"), None).is_none());
    }

    #[test]
    fn ambiguous_barangay_with_city_hint() {
        let g = sample();
        let u = g.find_barangay("Brgy. San Roque", Some("Marikina"), None).unwrap();
        assert_eq!(u.city.as_deref(), Some("City of Marikina"));
        let u = g.find_barangay("Barangay 171", Some("North Caloocan"), None).unwrap();
        assert_eq!(u.city.as_deref(), Some("City of Caloocan"));
    }

    #[test]
    fn ambiguous_barangay_with_province_hint_takes_first() {
        let g = sample();
        let u = g.find_barangay("San Roque", None, Some("NCR")).unwrap();
        assert_eq!(u.city.as_deref(), Some("City of Marikina"));
    }

    #[test]
    fn strict_province_hint_needs_a_single_unit() {
        let g = sample();
        assert_eq!(g.barangay_id_strict("San Roque", None, Some("Metro Manila")), None);
        let id = g.barangay_id_strict("San Roque", Some("Marikina"), Some("Metro Manila")).unwrap();
        assert_eq!(g.unit(id).city(), Some("City of Marikina"));
        let id = g.barangay_id_strict("Poblacion", None, Some("Bukidnon")).unwrap();
        assert_eq!(g.unit(id).province(), Some("Bukidnon"));
    }

    #[test]
    fn city_suffix_variants() {
        let g = sample();
        assert_eq!(g.find_city("Davao", None).unwrap().city.as_deref(), Some("Davao City"));
        assert_eq!(g.find_city("Marikina City", None).unwrap().city.as_deref(), Some("City of Marikina"));
    }

    #[test]
    fn city_aliases_are_folded() {
        let g = sample();
        assert_eq!(g.find_city("QC", None).unwrap().city.as_deref(), Some("Quezon City"));
        assert_eq!(g.find_city("Montalban", None).unwrap().province.as_deref(), Some("Rizal"));
        assert_eq!(g.find_city("north caloocan", None).unwrap().city.as_deref(), Some("City of Caloocan"));
    }

    #[test]
    fn priority_only_without_hint() {
        let g = sample();
        assert!(g.is_ambiguous_city("Quezon"));
        assert_eq!(g.find_city("Quezon", None).unwrap().city.as_deref(), Some("Quezon City"));
        let u = g.find_city("Quezon", Some("Bukidnon")).unwrap();
        assert_eq!(u.province.as_deref(), Some("Bukidnon"));
        assert!(g.find_city("Quezon", Some("Cebu")).is_none());
    }

    #[test]
    fn ambiguous_city_without_priority_is_none() {
        let g = sample();
        assert!(g.is_ambiguous_city("Rizal"));
        assert!(g.find_city("Rizal", None).is_none());
        assert_eq!(g.find_city("Rizal", Some("Palawan")).unwrap().province.as_deref(), Some("Palawan"));
    }

    #[test]
    fn provinces_and_regions() {
        let g = sample();
        assert_eq!(g.find_province("Rizal Province").unwrap().region, "Region IV-A");
        assert_eq!(g.find_province("ncr").unwrap().province.as_deref(), Some("Metro Manila"));
        assert!(g.find_region("Region X").is_some());
    }

    #[test]
    fn hierarchy_checks() {
        let g = sample();
        assert!(g.city_in_province("Marikina", "Metro Manila"));
        assert!(!g.city_in_province("Marikina", "Rizal"));
        assert!(g.barangay_in_city("Tumana", "City of Marikina", "Metro Manila"));
    }

    #[test]
    fn demotion_clears_inconsistent_levels() {
        let g = sample();
        let mut m = LocationMatch {
            region: "NCR".into(),
            province: "Rizal".into(),
            city: "City of Marikina".into(),
            barangay: "Tumana".into(),
            confidence: 0.9,
        };
        assert!(g.demote_inconsistent(&mut m));
        assert_eq!(m.city, NONE);
        assert_eq!(m.barangay, NONE);
    }

    #[test]
    fn stats_count_levels() {
        let s = sample().stats();
        assert_eq!(s.regions, 5);
        assert_eq!(s.provinces, 7);
        assert_eq!(s.barangays, 9);
        assert!(s.ambiguous_barangays >= 3);
    }

    #[test]
    fn malformed_rows_abort_the_build() {
        let err = Gazetteer::build(vec![row("NCR", "", "", "Tumana")]).unwrap_err();
        assert!(matches!(err, GeoError::Malformed { row: 0, .. }));
        let err = Gazetteer::build(vec![row("NCR", "", "Pateros", "")]).unwrap_err();
        assert!(matches!(err, GeoError::Malformed { .. }));
        let err = Gazetteer::build(vec![row(" ", "Cebu", "", "")]).unwrap_err();
        assert!(matches!(err, GeoError::Malformed { .. }));
        assert!(matches!(Gazetteer::build(vec![]), Err(GeoError::EmptyDataset)));
    }
}
