// crates/phgeo-core/src/raw.rs

//! Raw dataset structures as they come from JSON.
//!
//! NOTE: These types mirror the external dataset. They are flattened into
//! [`AdminUnit`] rows before the index is built and are not part of the
//! resolver API.

use crate::model::AdminUnit;
use crate::text::{is_all_caps, title_case};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A city/municipality and its barangays.
#[derive(Debug, Default, Deserialize)]
pub struct MunicipalityRaw {
    #[serde(default)]
    pub barangay_list: Vec<String>,
}

/// A province and its cities/municipalities.
#[derive(Debug, Default, Deserialize)]
pub struct ProvinceRaw {
    #[serde(default)]
    pub municipality_list: BTreeMap<String, MunicipalityRaw>,
}

/// A region entry, keyed by its code ("01", "NCR", ...) in the top map.
#[derive(Debug, Deserialize)]
pub struct RegionRaw {
    pub region_name: String,
    #[serde(default)]
    pub province_list: BTreeMap<String, ProvinceRaw>,
}

/// Either the nested region → province → municipality → barangay document
/// or a flat list of rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DatasetRaw {
    Rows(Vec<AdminUnit>),
    Nested(BTreeMap<String, RegionRaw>),
}

impl DatasetRaw {
    /// Flattens the dataset into one row per leaf (barangay, or city without
    /// barangays, or province without cities, ...).
    ///
    /// ALL-CAPS names are converted to display case; names are otherwise
    /// kept verbatim. Validation happens in the index builder.
    pub fn into_rows(self) -> Vec<AdminUnit> {
        match self {
            DatasetRaw::Rows(rows) => rows,
            DatasetRaw::Nested(regions) => {
                let mut rows = Vec::new();
                for region in regions.into_values() {
                    let region_name = display(&region.region_name);
                    if region.province_list.is_empty() {
                        rows.push(AdminUnit::new(region_name.clone(), None, None, None));
                    }
                    for (province_name, province) in region.province_list {
                        let province_name = display(&province_name);
                        if province.municipality_list.is_empty() {
                            rows.push(AdminUnit::new(
                                region_name.clone(),
                                Some(&province_name),
                                None,
                                None,
                            ));
                        }
                        for (city_name, city) in province.municipality_list {
                            let city_name = display(&city_name);
                            if city.barangay_list.is_empty() {
                                rows.push(AdminUnit::new(
                                    region_name.clone(),
                                    Some(&province_name),
                                    Some(&city_name),
                                    None,
                                ));
                            }
                            for barangay in city.barangay_list {
                                rows.push(AdminUnit::new(
                                    region_name.clone(),
                                    Some(&province_name),
                                    Some(&city_name),
                                    Some(&display(&barangay)),
                                ));
                            }
                        }
                    }
                }
                rows
            }
        }
    }
}

fn display(name: &str) -> String {
    let trimmed = name.trim();
    if is_all_caps(trimmed) {
        title_case(trimmed)
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_document_flattens_to_leaves() {
        let json = r#"{
            "07": {
                "region_name": "REGION VII (CENTRAL VISAYAS)",
                "province_list": {
                    "CEBU": {
                        "municipality_list": {
                            "CONSOLACION": { "barangay_list": ["PITOGO", "CASILI"] },
                            "TABOGON": { "barangay_list": [] }
                        }
                    }
                }
            }
        }"#;
        let raw: DatasetRaw = serde_json::from_str(json).unwrap();
        let rows = raw.into_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region, "Region VII (Central Visayas)");
        assert_eq!(rows[0].city.as_deref(), Some("Consolacion"));
        assert_eq!(rows[0].barangay.as_deref(), Some("Pitogo"));
        assert_eq!(rows[2].city.as_deref(), Some("Tabogon"));
        assert_eq!(rows[2].barangay, None);
    }

    #[test]
    fn flat_rows_pass_through() {
        let json = r#"[{"region": "NCR", "province": "Metro Manila", "city": "Pateros"}]"#;
        let raw: DatasetRaw = serde_json::from_str(json).unwrap();
        let rows = raw.into_rows();
        assert_eq!(rows, vec![AdminUnit::new("NCR", Some("Metro Manila"), Some("Pateros"), None)]);
    }
}
