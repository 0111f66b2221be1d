// crates/phgeo-core/src/loader/snapshot.rs

//! Binary snapshots of a built index.
//!
//! A snapshot is the bincode encoding of [`Gazetteer`], gzip-compressed when
//! the `compact` feature is on. Loading one skips dataset parsing and the
//! index build entirely.

use super::common_io;
use crate::error::{GeoError, Result};
use crate::gazetteer::Gazetteer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    /// Gzip when the `compact` feature is enabled.
    pub fn preferred() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

impl Gazetteer {
    /// Writes the index as a snapshot, compressed when `compact` is on.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_snapshot_with(path, CompressionMode::preferred())
    }

    pub fn save_snapshot_with(&self, path: impl AsRef<Path>, compression: CompressionMode) -> Result<()> {
        let path = path.as_ref();
        write_snapshot(path, self, compression)?;
        tracing::info!(path = %path.display(), ?compression, "gazetteer snapshot written");
        Ok(())
    }

    /// Reads a snapshot written by [`Gazetteer::save_snapshot`]. Gzip is
    /// detected from the content, not the file name.
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            GeoError::NotFound(format!("Snapshot not found at {}: {}", path.display(), e))
        })?;
        let bytes = common_io::decode_bytes(bytes)?;
        let gazetteer: Gazetteer = bincode::deserialize(&bytes)?;
        tracing::info!(path = %path.display(), units = gazetteer.units().len(), "gazetteer snapshot loaded");
        Ok(gazetteer)
    }
}

fn write_snapshot<T: serde::Serialize>(path: &Path, value: &T, compression: CompressionMode) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                bincode::serialize_into(&mut encoder, value)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(GeoError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => {
            bincode::serialize_into(&mut writer, value)?;
            writer.flush()?;
        }
    }
    Ok(())
}
