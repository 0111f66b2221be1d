// crates/phgeo-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, decompression) and hands the payload
//! to the right parser: bincode snapshots for `.bin` files, the JSON
//! dataset formats of [`crate::raw`] for everything else.

use crate::error::{GeoError, Result};
use crate::gazetteer::Gazetteer;
use once_cell::sync::OnceCell;
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod common_io;
pub mod snapshot;

static GAZETTEER_CACHE: OnceCell<Gazetteer> = OnceCell::new();

impl Gazetteer {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "sample_gazetteer.json"
    }

    /// Loads the bundled dataset once per process and hands out a shared,
    /// read-only index.
    pub fn load() -> Result<&'static Gazetteer> {
        GAZETTEER_CACHE.get_or_try_init(|| {
            let path = Self::default_data_dir().join(Self::default_dataset_filename());
            Self::load_from_path(path)
        })
    }

    /// Loads a snapshot (`*.bin`, `*.bin.gz`) or a JSON dataset (`*.json`,
    /// `*.json.gz`).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if is_snapshot_path(path) {
            return Self::load_snapshot(path);
        }
        let reader = common_io::open_stream(path)?;
        let gazetteer = Self::from_reader(reader)?;
        tracing::info!(path = %path.display(), units = gazetteer.units().len(), "dataset loaded");
        Ok(gazetteer)
    }

    /// Parses a JSON dataset (nested or flat rows) and builds the index.
    #[cfg(feature = "json")]
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: crate::raw::DatasetRaw = serde_json::from_reader(reader)?;
        Self::build(raw.into_rows())
    }

    #[cfg(not(feature = "json"))]
    pub fn from_reader(_reader: impl Read) -> Result<Self> {
        Err(GeoError::InvalidData(
            "JSON datasets need the 'json' feature; load a snapshot instead".into(),
        ))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_reader(json.as_bytes())
    }
}

fn is_snapshot_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".bin") || name.ends_with(".bin.gz")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_paths_by_name() {
        assert!(is_snapshot_path(Path::new("out/ph.bin")));
        assert!(is_snapshot_path(Path::new("out/PH.BIN.GZ")));
        assert!(!is_snapshot_path(Path::new("data/ph.json.gz")));
    }

    #[test]
    fn default_dataset_is_bundled() {
        let path = Gazetteer::default_data_dir().join(Gazetteer::default_dataset_filename());
        assert!(path.is_file(), "{}", path.display());
    }

    #[test]
    fn missing_dataset_reports_the_path() {
        let err = Gazetteer::load_from_path("no/such/ph.json").err().unwrap();
        assert!(matches!(&err, GeoError::NotFound(msg) if msg.contains("no/such/ph.json")));
        let err = Gazetteer::load_from_path("no/such/ph.bin.gz").err().unwrap();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}
