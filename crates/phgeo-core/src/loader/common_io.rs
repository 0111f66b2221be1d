// crates/phgeo-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// First two bytes of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a dataset file, buffered, and gunzips it when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if !is_gzip_path(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

/// Wraps already read bytes in a gzip decoder when they start with the
/// gzip magic number.
pub fn decode_bytes(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }

    #[cfg(feature = "compact")]
    {
        let mut out = Vec::new();
        GzDecoder::new(bytes.as_slice()).read_to_end(&mut out)?;
        Ok(out)
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoError::InvalidData(
            "gzip-compressed snapshot but the 'compact' feature is disabled".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gzip_paths_are_detected_by_extension() {
        assert!(is_gzip_path(Path::new("data/ph.json.gz")));
        assert!(is_gzip_path(Path::new("data/ph.json.GZ")));
        assert!(!is_gzip_path(Path::new("data/ph.json")));
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(decode_bytes(b"{}".to_vec()).unwrap(), b"{}".to_vec());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = open_stream(Path::new("does/not/exist.json")).err().unwrap();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}
